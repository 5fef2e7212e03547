use futures::{FutureExt, StreamExt};
use futures_channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use snafu::prelude::*;
use tracing::trace;

use super::token::{ShareError, ShareToken, SinkClosedSnafu};
use crate::tree::TreeNode;

/// Receives every committed forest, e.g. to keep a shareable link current.
pub trait PersistenceSink {
    fn persist(&mut self, forest: &[TreeNode]) -> Result<(), ShareError>;
}

/// Forwards share tokens to whoever holds the receiving end.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: UnboundedSender<ShareToken>,
}

impl ChannelSink {
    pub fn channel() -> (Self, UnboundedReceiver<ShareToken>) {
        let (sender, receiver) = mpsc::unbounded();
        (Self { sender }, receiver)
    }

    /// Drains what is already queued and keeps only the newest token.
    pub fn latest(receiver: &mut UnboundedReceiver<ShareToken>) -> Option<ShareToken> {
        let mut latest = None;
        while let Some(Some(token)) = receiver.next().now_or_never() {
            latest = Some(token);
        }
        latest
    }
}

impl PersistenceSink for ChannelSink {
    fn persist(&mut self, forest: &[TreeNode]) -> Result<(), ShareError> {
        let token = ShareToken::encode(forest)?;
        trace!("Queueing share token of {} characters", token.as_str().len());
        self.sender.unbounded_send(token).ok().context(SinkClosedSnafu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::assign_fresh_ids;
    use crate::tree::{ParsedNode, SequentialIdAllocator};

    fn forest(name: &str) -> Vec<TreeNode> {
        assign_fresh_ids(vec![ParsedNode::file(name)], &mut SequentialIdAllocator::new())
    }

    #[test]
    fn bursts_coalesce_into_the_newest_token() {
        let (mut sink, mut receiver) = ChannelSink::channel();
        for name in ["first", "second", "third"] {
            sink.persist(&forest(name)).unwrap();
        }

        let token = ChannelSink::latest(&mut receiver).unwrap();
        let decoded = ShareToken::decode(token.as_str()).unwrap();
        assert_eq!(decoded[0].name, "third");
        assert!(ChannelSink::latest(&mut receiver).is_none());
    }

    #[test]
    fn closed_receiver_is_reported() {
        let (mut sink, receiver) = ChannelSink::channel();
        drop(receiver);
        assert!(matches!(sink.persist(&forest("x")), Err(ShareError::SinkClosed)));
    }
}
