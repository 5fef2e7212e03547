use std::io::Read;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use bincode::{Decode, Encode};
use derive_more::Display;
use snafu::prelude::*;
use tracing::debug;

use crate::tree::{refresh_paths, Node, NodeKind, ParsedNode};

const COMPRESSION_LEVEL: i32 = 19;
/// Upper bound on the decompressed payload accepted from a token.
const MAX_DECODED_BYTES: usize = 1 << 20;

/// Wire shape of a node: identifiers and paths are not shared.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
struct SharedNode {
    name: String,
    comment: Option<String>,
    children: Option<Vec<SharedNode>>,
}

impl<I> From<&Node<I>> for SharedNode {
    fn from(node: &Node<I>) -> Self {
        Self {
            name: node.name.clone(),
            comment: node.comment.clone(),
            children: node
                .children()
                .map(|children| children.iter().map(SharedNode::from).collect()),
        }
    }
}

impl From<SharedNode> for ParsedNode {
    fn from(shared: SharedNode) -> Self {
        Node {
            id: (),
            name: shared.name,
            path: String::new(),
            comment: shared.comment,
            kind: match shared.children {
                Some(children) => NodeKind::Folder(children.into_iter().map(ParsedNode::from).collect()),
                None => NodeKind::File,
            },
        }
    }
}

/// A forest packed into a URL-safe string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display("{_0}")]
pub struct ShareToken(String);

impl ShareToken {
    pub fn encode<I>(forest: &[Node<I>]) -> Result<Self, ShareError> {
        let shared: Vec<SharedNode> = forest.iter().map(SharedNode::from).collect();
        let bytes = bincode::encode_to_vec(&shared, bincode::config::standard()).context(EncodeSnafu)?;
        let compressed = zstd::encode_all(bytes.as_slice(), COMPRESSION_LEVEL).context(CompressSnafu)?;
        debug!(
            "Packed {} root node(s): {} bytes, {} compressed",
            shared.len(),
            bytes.len(),
            compressed.len()
        );
        Ok(Self(URL_SAFE_NO_PAD.encode(compressed)))
    }

    pub fn decode(token: &str) -> Result<Vec<ParsedNode>, ShareError> {
        let compressed = URL_SAFE_NO_PAD.decode(token.trim()).context(Base64Snafu)?;
        let bytes = decompress(&compressed)?;
        let config = bincode::config::standard().with_limit::<MAX_DECODED_BYTES>();
        let (shared, _): (Vec<SharedNode>, usize) =
            bincode::decode_from_slice(&bytes, config).context(DecodeSnafu)?;

        let mut forest: Vec<ParsedNode> = shared.into_iter().map(ParsedNode::from).collect();
        refresh_paths(&mut forest);
        Ok(forest)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn decompress(compressed: &[u8]) -> Result<Vec<u8>, ShareError> {
    let decoder = zstd::stream::read::Decoder::new(compressed).context(DecompressSnafu)?;
    let mut bytes = Vec::new();
    decoder
        .take(MAX_DECODED_BYTES as u64 + 1)
        .read_to_end(&mut bytes)
        .context(DecompressSnafu)?;
    ensure!(
        bytes.len() <= MAX_DECODED_BYTES,
        TokenTooLargeSnafu {
            limit: MAX_DECODED_BYTES
        }
    );
    Ok(bytes)
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ShareError {
    #[snafu(display("Failed to serialize the tree"))]
    EncodeError { source: bincode::error::EncodeError },
    #[snafu(display("Failed to compress the tree"))]
    CompressError { source: std::io::Error },
    #[snafu(display("Share token is not valid base64"))]
    Base64Error { source: base64::DecodeError },
    #[snafu(display("Failed to decompress the share token"))]
    DecompressError { source: std::io::Error },
    #[snafu(display("Share token expands beyond {} bytes", limit))]
    TokenTooLarge { limit: usize },
    #[snafu(display("Share token does not contain a tree"))]
    DecodeError { source: bincode::error::DecodeError },
    #[snafu(display("Nobody is listening for share tokens anymore"))]
    SinkClosed,
}
