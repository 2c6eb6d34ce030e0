//! Sort request parameters

use serde::Deserialize;

use crate::core::compiler::SortOptions;
use crate::core::error::ValidationError;
use crate::core::field::FieldValue;
use crate::core::projection::EqualityCondition;

/// Query parameters controlling sort order
///
/// This structure is used to extract sort parameters from URL query strings.
/// All parameters are optional.
///
/// # Example
/// ```rust,ignore
/// // In handler:
/// pub async fn list_products(
///     Query(params): Query<QueryParams>,
/// ) -> Result<Json<Vec<Product>>, SortError> {
///     let expression = params.sort_expression()?;
///     let sorted = order_by_property(
///         store.query(),
///         expression.path(),
///         &params.sort_options(expression.ascending),
///     )?;
///     Ok(Json(sorted))
/// }
///
/// // Usage:
/// GET /products?sort=translations.name:desc&lang=pt-BR
/// GET /products?sort=translations.name&sort_field=region&sort_value=EU
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct QueryParams {
    /// Sort field and direction
    ///
    /// # Format
    /// - `field:asc` or `field` (ascending)
    /// - `field:desc` (descending)
    /// - `field` may be a dotted path (`category.name`, `translations.name`)
    pub sort: Option<String>,

    /// Locale used to pick localized collection elements
    pub lang: Option<String>,

    /// Member of collection elements to match instead of the locale,
    /// together with `sort_value`
    pub sort_field: Option<String>,

    /// Value `sort_field` must equal
    pub sort_value: Option<String>,
}

impl QueryParams {
    /// Parse the `sort` parameter; absent means default ordering
    pub fn sort_expression(&self) -> Result<SortExpression, ValidationError> {
        match self.sort.as_deref() {
            Some(sort) => SortExpression::parse(sort),
            None => Ok(SortExpression::default()),
        }
    }

    /// Options for the request in the given direction
    pub fn sort_options(&self, ascending: bool) -> SortOptions {
        // A field without a value is ignored and the locale default applies
        let equality = match (&self.sort_field, &self.sort_value) {
            (Some(property), Some(value)) => Some(EqualityCondition {
                property: property.clone(),
                value: FieldValue::String(value.clone()),
            }),
            _ => None,
        };

        SortOptions {
            ascending,
            equality,
            locale: self.lang.clone(),
        }
    }
}

/// A parsed `path[:direction]` sort expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortExpression {
    pub path: Option<String>,
    pub ascending: bool,
}

impl Default for SortExpression {
    fn default() -> Self {
        Self {
            path: None,
            ascending: true,
        }
    }
}

impl SortExpression {
    /// Parse `field`, `field:asc` or `field:desc` (direction is case-insensitive)
    pub fn parse(expression: &str) -> Result<Self, ValidationError> {
        let (path, direction) = match expression.rsplit_once(':') {
            Some((path, direction)) => (path, Some(direction.trim())),
            None => (expression, None),
        };

        let ascending = match direction {
            None => true,
            Some(d) if d.eq_ignore_ascii_case("asc") => true,
            Some(d) if d.eq_ignore_ascii_case("desc") => false,
            Some(d) => {
                return Err(ValidationError::InvalidDirection {
                    value: d.to_string(),
                });
            }
        };

        let path = path.trim();
        Ok(Self {
            path: (!path.is_empty()).then(|| path.to_string()),
            ascending,
        })
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params_defaults() {
        let params = QueryParams::default();
        let expression = params.sort_expression().unwrap();
        assert_eq!(expression.path(), None);
        assert!(expression.ascending);

        let options = params.sort_options(expression.ascending);
        assert!(options.equality.is_none());
        assert!(options.locale.is_none());
    }

    #[test]
    fn test_parse_plain_field() {
        let expression = SortExpression::parse("translations.name").unwrap();
        assert_eq!(expression.path(), Some("translations.name"));
        assert!(expression.ascending);
    }

    #[test]
    fn test_parse_directions() {
        assert!(SortExpression::parse("amount:asc").unwrap().ascending);
        assert!(!SortExpression::parse("amount:desc").unwrap().ascending);
        assert!(!SortExpression::parse("amount:DESC").unwrap().ascending);
    }

    #[test]
    fn test_parse_direction_only() {
        let expression = SortExpression::parse(":desc").unwrap();
        assert_eq!(expression.path(), None);
        assert!(!expression.ascending);
    }

    #[test]
    fn test_parse_invalid_direction() {
        let err = SortExpression::parse("amount:sideways").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidDirection {
                value: "sideways".to_string()
            }
        );
    }

    #[test]
    fn test_params_from_query_string() {
        let params: QueryParams = serde_json::from_value(serde_json::json!({
            "sort": "translations.name:desc",
            "lang": "pt-BR",
            "sort_field": "region",
            "sort_value": "EU"
        }))
        .unwrap();

        let expression = params.sort_expression().unwrap();
        assert_eq!(expression.path(), Some("translations.name"));
        assert!(!expression.ascending);

        let options = params.sort_options(expression.ascending);
        assert!(!options.ascending);
        assert_eq!(options.locale.as_deref(), Some("pt-BR"));
        assert_eq!(
            options.equality,
            Some(EqualityCondition::new("region", "EU"))
        );
    }

    #[test]
    fn test_sort_field_without_value_keeps_locale_default() {
        let params: QueryParams = serde_json::from_value(serde_json::json!({
            "sort": "translations.name",
            "sort_field": "language_code"
        }))
        .unwrap();

        let options = params.sort_options(true);
        assert!(options.equality.is_none());

        let params = QueryParams {
            sort_value: Some("EU".to_string()),
            ..Default::default()
        };
        assert!(params.sort_options(true).equality.is_none());
    }
}
