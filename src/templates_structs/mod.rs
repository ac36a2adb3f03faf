// Template context structures for Askama templates, organized by resource.
// Templates with an `.html` extension are autoescaped; only regions the
// dashboard rendered itself are spliced in with `|safe`.

pub mod common;
pub mod dashboard;
pub mod room;
pub mod user;

pub use common::{ErrorPanelTemplate, RegionStatus, error_panel};
pub use dashboard::DashboardTemplate;
pub use room::{RoomsTemplate, render_rooms};
pub use user::{UsersTemplate, render_users};

/// Custom filters available to every template in this module tree.
pub mod filters {
    use crate::models::MongoDate;

    /// Anything the `date` filter can format.
    pub trait DateLike {
        fn as_mongo_date(&self) -> Option<MongoDate>;
    }

    impl DateLike for MongoDate {
        fn as_mongo_date(&self) -> Option<MongoDate> {
            Some(*self)
        }
    }

    impl DateLike for Option<MongoDate> {
        fn as_mongo_date(&self) -> Option<MongoDate> {
            *self
        }
    }

    impl<T: DateLike + ?Sized> DateLike for &T {
        fn as_mongo_date(&self) -> Option<MongoDate> {
            (**self).as_mongo_date()
        }
    }

    /// `{{ created|date("%Y-%m-%d %H:%M") }}`: format a `{"$date": ...}`
    /// value with a strftime pattern. Missing dates render as nothing.
    pub fn date<D: DateLike, F: AsRef<str>>(
        value: D,
        _: &dyn askama::Values,
        fmt: F,
    ) -> askama::Result<String> {
        let Some(date) = value.as_mongo_date() else {
            return Ok(String::new());
        };
        date.format(fmt.as_ref()).ok_or_else(|| {
            askama::Error::Custom(format!("invalid date format '{}'", fmt.as_ref()).into())
        })
    }

}
