use chrono::{DateTime, Utc};
use restock_schema::AddProductRequest;

use crate::db::MissingProductCreate;
use crate::error::RestockError;

pub(crate) const MISSING_NAMES_MESSAGE: &str = "productName and supplierName are required";

/// Validates an `add` body and stamps it with the request time.
///
/// Names are trimmed; a name that is absent or blank after trimming is rejected.
pub fn new_missing_product(
    body: AddProductRequest,
    requested_at: DateTime<Utc>,
) -> Result<MissingProductCreate, RestockError> {
    let product_name = non_blank(body.product_name);
    let supplier_name = non_blank(body.supplier_name);

    let (Some(product_name), Some(supplier_name)) = (product_name, supplier_name) else {
        return Err(RestockError::Validation(MISSING_NAMES_MESSAGE.to_string()));
    };

    Ok(MissingProductCreate {
        product_name,
        supplier_name,
        priority: body.priority.unwrap_or_default(),
        requested_at,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use restock_schema::Priority;

    fn body(product: Option<&str>, supplier: Option<&str>) -> AddProductRequest {
        AddProductRequest {
            product_name: product.map(str::to_string),
            supplier_name: supplier.map(str::to_string),
            priority: None,
        }
    }

    #[test]
    fn trims_names_and_defaults_priority_to_medium() {
        let now = Utc::now();
        let create = new_missing_product(body(Some("  Yerba 1kg "), Some("Acme")), now).unwrap();
        assert_eq!(create.product_name, "Yerba 1kg");
        assert_eq!(create.supplier_name, "Acme");
        assert_eq!(create.priority, Priority::Medium);
        assert_eq!(create.requested_at, now);
    }

    #[test]
    fn keeps_explicit_priority() {
        let mut req = body(Some("Yerba"), Some("Acme"));
        req.priority = Some(Priority::High);
        let create = new_missing_product(req, Utc::now()).unwrap();
        assert_eq!(create.priority, Priority::High);
    }

    #[test]
    fn rejects_missing_or_blank_names() {
        for (product, supplier) in [
            (None, Some("Acme")),
            (Some("Yerba"), None),
            (Some(""), Some("Acme")),
            (Some("Yerba"), Some("   ")),
        ] {
            let err = new_missing_product(body(product, supplier), Utc::now()).unwrap_err();
            assert!(matches!(err, RestockError::Validation(ref m) if m == MISSING_NAMES_MESSAGE));
        }
    }
}
