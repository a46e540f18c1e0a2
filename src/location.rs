//! Where the user is.
//!
//! A [`Locator`] stands in for device geolocation and may fail. Resolution
//! never fails: it falls back to the configured default location, then to
//! [`Location::FALLBACK`].

use std::fmt;

use crate::model::Location;

// Platform locators report all three; `FixedLocator` only reports `Unavailable`.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("timed out waiting for a location fix")]
    Timeout,

    #[error("location unavailable: {0}")]
    Unavailable(String),
}

pub trait Locator {
    fn locate(&self) -> Result<Location, LocationError>;
}

/// A locator that answers with whatever coordinates it was given.
///
/// On the command line the "device" location is `--lat`/`--lng`.
pub struct FixedLocator(pub Option<Location>);

impl Locator for FixedLocator {
    fn locate(&self) -> Result<Location, LocationError> {
        self.0
            .ok_or_else(|| LocationError::Unavailable("no coordinates given".to_string()))
    }
}

/// Which source a resolved location came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationSource {
    Device,
    Configured,
    Fallback,
}

impl fmt::Display for LocationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Device => "current location",
            Self::Configured => "configured default",
            Self::Fallback => "fallback location",
        })
    }
}

/// Resolve a location, falling back when the locator fails.
pub fn resolve(locator: &dyn Locator, configured: Option<Location>) -> (Location, LocationSource) {
    match locator.locate() {
        Ok(location) => (location, LocationSource::Device),
        Err(e) => {
            tracing::info!(error = %e, "falling back from device location");
            match configured {
                Some(location) => (location, LocationSource::Configured),
                None => (Location::FALLBACK, LocationSource::Fallback),
            }
        }
    }
}
