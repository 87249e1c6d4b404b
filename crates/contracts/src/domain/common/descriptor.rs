//! Static description of a REST resource: where it lives, how its responses
//! are wrapped and which optional capabilities it has.

use super::pagination::ListQuery;
use super::record::{IdentityField, Record};
use super::status::{StatusRoute, StatusToggle, StatusValue};

/// How the list endpoint is addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListRoute {
    /// `GET {base}?page=..`
    Base,
    /// `GET {base}/{segment}/{scope}`, e.g. variants of one product.
    Scoped(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceDescriptor {
    /// Collection name used in logs and page keys.
    pub name: &'static str,
    /// Singular noun for notifications ("Diamond created").
    pub noun: &'static str,
    pub base_path: &'static str,
    pub list_route: ListRoute,
    /// Collection key of the list envelope (`diamonds`, `images`, ...).
    pub list_key: &'static str,
    /// Wrapper key of single-record responses, when the backend wraps them.
    pub item_key: Option<&'static str>,
    pub identity: IdentityField,
    pub status: Option<StatusToggle>,
    /// Path segment of the spreadsheet import endpoint.
    pub bulk_path: Option<&'static str>,
    /// Multipart field carrying the uploaded file on create/update.
    pub file_field: &'static str,
    pub default_limit: u32,
    /// Limit of the reconciliation fetch issued after a bulk import.
    pub bulk_refetch_limit: u32,
    pub read_only: bool,
}

impl ResourceDescriptor {
    pub const fn new(name: &'static str, noun: &'static str, base_path: &'static str) -> Self {
        Self {
            name,
            noun,
            base_path,
            list_route: ListRoute::Base,
            list_key: name,
            item_key: None,
            identity: IdentityField::DocumentId,
            status: None,
            bulk_path: None,
            file_field: "image",
            default_limit: 50,
            bulk_refetch_limit: 50,
            read_only: false,
        }
    }

    /// Path of the list request, or `None` for a scoped list without a scope.
    pub fn list_path(&self, query: &ListQuery) -> Option<String> {
        match self.list_route {
            ListRoute::Base => Some(self.base_path.to_string()),
            ListRoute::Scoped(segment) => {
                let scope = query.scope.as_deref().filter(|s| !s.is_empty())?;
                Some(format!(
                    "{}/{}/{}",
                    self.base_path,
                    segment,
                    urlencoding::encode(scope)
                ))
            }
        }
    }

    pub fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.base_path, urlencoding::encode(id))
    }

    pub fn status_path(&self, id: &str, target: &StatusValue) -> Option<String> {
        let toggle = self.status?;
        let action = match toggle.route {
            StatusRoute::ActivateDeactivate if target.is_active() => "activate",
            StatusRoute::ActivateDeactivate => "deactivate",
            StatusRoute::StatusBody => "status",
        };
        Some(format!("{}/{}", self.item_path(id), action))
    }

    pub fn bulk_import_path(&self) -> Option<String> {
        self.bulk_path
            .map(|segment| format!("{}/{}", self.base_path, segment))
    }

    /// Query of the fetch that follows a bulk import.
    pub fn refetch_query(&self) -> ListQuery {
        ListQuery::new(1, self.bulk_refetch_limit)
    }

    pub fn default_query(&self) -> ListQuery {
        ListQuery::new(1, self.default_limit)
    }

    pub fn identity_of(&self, record: &Record) -> Option<String> {
        record.identity(self.identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::StatusValue;

    const DIAMONDS: ResourceDescriptor = ResourceDescriptor {
        status: Some(StatusToggle {
            field: "active",
            route: StatusRoute::ActivateDeactivate,
            response_key: Some("diamond"),
            labelled: false,
        }),
        bulk_path: Some("bulk"),
        ..ResourceDescriptor::new("diamonds", "Diamond", "/admin/diamonds")
    };

    const VARIANTS: ResourceDescriptor = ResourceDescriptor {
        list_route: ListRoute::Scoped("product"),
        ..ResourceDescriptor::new("variants", "Variant", "/admin/variants")
    };

    #[test]
    fn paths() {
        assert_eq!(DIAMONDS.item_path("abc"), "/admin/diamonds/abc");
        assert_eq!(
            DIAMONDS.status_path("abc", &StatusValue::Flag(false)).as_deref(),
            Some("/admin/diamonds/abc/deactivate")
        );
        assert_eq!(
            DIAMONDS.bulk_import_path().as_deref(),
            Some("/admin/diamonds/bulk")
        );
        assert_eq!(VARIANTS.bulk_import_path(), None);
    }

    #[test]
    fn natural_keys_are_encoded() {
        let metals = ResourceDescriptor::new("metals", "Metal", "/admin/metals");
        assert_eq!(metals.item_path("18K Gold"), "/admin/metals/18K%20Gold");
    }

    #[test]
    fn scoped_list_needs_scope() {
        assert_eq!(VARIANTS.list_path(&ListQuery::default()), None);
        assert_eq!(
            VARIANTS.list_path(&ListQuery::scoped("p1")).as_deref(),
            Some("/admin/variants/product/p1")
        );
        assert_eq!(
            DIAMONDS.list_path(&ListQuery::default()).as_deref(),
            Some("/admin/diamonds")
        );
    }

    #[test]
    fn resources_without_toggle_have_no_status_path() {
        assert_eq!(VARIANTS.status_path("x", &StatusValue::Flag(true)), None);
    }
}
