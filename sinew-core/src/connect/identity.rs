//! One-to-one pairing by position.

use tracing::instrument;

use crate::{ConnectError, Connection, Population, Result};

use super::{Connector, record};

/// Connects the `i`-th pre neuron to the `i`-th post neuron.
///
/// Both populations must hold the same number of neurons; their shapes may
/// differ.
///
/// # Examples
/// ```
/// use sinew_core::{Connector, One2One, Population};
///
/// let pre = Population::from_ids(vec![4, 5, 6]);
/// let post = Population::from_ids(vec![9, 8, 7]);
/// let connection = One2One.connect(&pre, &post)?;
/// assert_eq!(connection.pre_ids(), &[4, 5, 6]);
/// assert_eq!(connection.post_ids(), &[9, 8, 7]);
/// assert_eq!((connection.num_pre(), connection.num_post()), (6, 9));
/// # Ok::<(), sinew_core::ConnectError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct One2One;

impl Connector for One2One {
    fn name(&self) -> &'static str {
        "one2one"
    }

    #[instrument(
        name = "connect.one2one",
        err,
        skip_all,
        fields(pre = %pre.shape(), post = %post.shape()),
    )]
    fn connect(&self, pre: &Population, post: &Population) -> Result<Connection> {
        if pre.len() != post.len() {
            return Err(ConnectError::ShapeMismatch {
                pre: pre.shape().clone(),
                post: post.shape().clone(),
            });
        }
        let connection = Connection::new(
            pre.ids().to_vec(),
            post.ids().to_vec(),
            pre.inferred_size(),
            post.inferred_size(),
        );
        record(self.name(), &connection);
        Ok(connection)
    }
}
