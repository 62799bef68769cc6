//! Response helper extensions.

use salvo::{
    http::{StatusCode, header::LOCATION},
    prelude::{Response, StatusError},
};

use super::result::ResultExt as _;

/// Post/redirect/get support.
pub(crate) trait RedirectExt {
    /// Answer `303 See Other` pointing at `location`.
    fn see_other(&mut self, location: &str) -> Result<(), StatusError>;
}

impl RedirectExt for Response {
    fn see_other(&mut self, location: &str) -> Result<(), StatusError> {
        self.add_header(LOCATION, location, true)
            .or_500("failed to set location header")?
            .status_code(StatusCode::SEE_OTHER);

        Ok(())
    }
}
