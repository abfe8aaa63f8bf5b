//! Named topologies without a generator yet.

use crate::{ConnectError, Result};

/// Scale-free (preferential attachment) topology. Not available yet.
///
/// # Examples
/// ```
/// use sinew_core::{ConnectError, ScaleFree};
///
/// assert!(matches!(ScaleFree::new(), Err(ConnectError::NotImplemented { .. })));
/// ```
#[derive(Debug)]
pub struct ScaleFree {
    _private: (),
}

impl ScaleFree {
    /// Always fails; no scale-free generator exists.
    ///
    /// # Errors
    /// Always returns [`ConnectError::NotImplemented`].
    pub fn new() -> Result<Self> {
        Err(ConnectError::NotImplemented {
            connector: "scale_free",
        })
    }
}

/// Small-world (rewired lattice) topology. Not available yet.
#[derive(Debug)]
pub struct SmallWorld {
    _private: (),
}

impl SmallWorld {
    /// Always fails; no small-world generator exists.
    ///
    /// # Errors
    /// Always returns [`ConnectError::NotImplemented`].
    pub fn new() -> Result<Self> {
        Err(ConnectError::NotImplemented {
            connector: "small_world",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_refuse_construction() {
        assert!(matches!(
            SmallWorld::new(),
            Err(ConnectError::NotImplemented {
                connector: "small_world"
            })
        ));
        assert!(ScaleFree::new().is_err());
    }
}
