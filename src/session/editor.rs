use tracing::{debug, warn};

use super::edit::{self, NodeDraft, NodeUpdate};
use super::error::SessionError;
use super::selection::{SelectMode, Selection};
use crate::codec::{AsciiCodec, MarkdownCodec, ParseError, TextFormat};
use crate::config::EditorConfig;
use crate::history::{History, HistoryEntry, TextState};
use crate::reconcile::{assign_fresh_ids, reconcile};
use crate::share::PersistenceSink;
use crate::tree::{refresh_paths, Forest, IdAllocator, NodeId, ParsedNode, SequentialIdAllocator, TreeNode};

/// Owns one document: its forest, the text it was read from, selection and history.
///
/// The Markdown text is the live editing surface. A text change that fails
/// to parse keeps the last good forest and locks structural edits until the
/// text is valid again or an undo restores a valid snapshot.
pub struct EditorSession<A: IdAllocator = SequentialIdAllocator> {
    config: EditorConfig,
    forest: Forest,
    selection: Selection,
    text: TextState,
    history: History,
    locked: bool,
    ids: A,
    sink: Option<Box<dyn PersistenceSink>>,
}

impl<A: IdAllocator> EditorSession<A> {
    pub fn new(forest: Forest, config: EditorConfig, ids: A) -> Self {
        let text = TextState::valid(MarkdownCodec::default().generate(&forest));
        let selection = Selection::default();
        let history = History::with_limit(
            HistoryEntry {
                tree: selection.snapshot(&forest),
                text: text.clone(),
            },
            config.history_limit,
        );

        Self {
            config,
            forest,
            selection,
            text,
            history,
            locked: false,
            ids,
            sink: None,
        }
    }

    /// Starts from a small sample project.
    pub fn with_template(config: EditorConfig, mut ids: A) -> Self {
        let mut template = vec![ParsedNode::folder(
            "root",
            vec![
                ParsedNode::folder("folder1", vec![ParsedNode::file("file1"), ParsedNode::file("file2")]),
                ParsedNode::folder("folder2", vec![ParsedNode::file("file3"), ParsedNode::file("file4")]),
            ],
        )];
        refresh_paths(&mut template);
        let forest = assign_fresh_ids(template, &mut ids);
        Self::new(forest, config, ids)
    }

    /// Reports every committed forest to `sink`.
    pub fn with_sink(mut self, sink: impl PersistenceSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn forest(&self) -> &[TreeNode] {
        &self.forest
    }

    pub fn text(&self) -> &TextState {
        &self.text
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn ascii(&self) -> String {
        AsciiCodec.generate(&self.forest)
    }

    pub fn markdown(&self) -> String {
        self.markdown_codec().generate(&self.forest)
    }

    fn markdown_codec(&self) -> MarkdownCodec {
        MarkdownCodec::new(self.config.auto_slash)
    }

    /// Replaces the text and, if it parses, carries identifiers over to the new forest.
    ///
    /// On failure the previous forest stays in place and the tree is locked.
    pub fn apply_markdown(&mut self, text: &str) -> Result<(), ParseError> {
        let codec = self.markdown_codec();
        let prepared = codec.prepare(text);

        match codec.parse_strict(&prepared) {
            Ok(parsed) => {
                self.forest = reconcile(parsed, &self.forest, &mut self.ids);
                self.selection.prune(&self.forest);
                self.text = TextState::valid(prepared.into_owned());
                self.locked = false;
                self.commit();
                Ok(())
            }
            Err(error) => {
                debug!("Markdown rejected, locking the tree: {error}");
                self.text = TextState::invalid(text, error.clone());
                self.locked = true;
                Err(error)
            }
        }
    }

    /// Replaces the whole document with a diagram. Identifiers are not carried over.
    pub fn import_ascii(&mut self, text: &str) -> Result<(), ParseError> {
        let parsed = AsciiCodec.parse(text)?;
        self.forest = assign_fresh_ids(parsed, &mut self.ids);
        self.selection.clear();
        self.text = TextState::valid(self.markdown());
        self.locked = false;
        self.commit();
        Ok(())
    }

    /// Steps back one snapshot. While locked, first returns to the last committed one.
    pub fn undo(&mut self) -> bool {
        if self.locked {
            self.restore_current();
            return true;
        }
        if self.history.undo().is_none() {
            return false;
        }
        self.restore_current();
        true
    }

    pub fn redo(&mut self) -> bool {
        if self.history.redo().is_none() {
            return false;
        }
        self.restore_current();
        true
    }

    /// Adds a node at the end of `parent`'s children, or as a new root.
    pub fn add_child(&mut self, parent: Option<&NodeId>, draft: NodeDraft) -> Result<NodeId, SessionError> {
        self.ensure_unlocked()?;
        let id = edit::insert_child(&mut self.forest, parent, draft, &mut self.ids)?;
        self.after_edit();
        Ok(id)
    }

    /// Adds a node at the end of the sibling list holding `of`.
    pub fn add_sibling(&mut self, of: &NodeId, draft: NodeDraft) -> Result<NodeId, SessionError> {
        self.ensure_unlocked()?;
        let id = edit::insert_sibling(&mut self.forest, of, draft, &mut self.ids)?;
        self.after_edit();
        Ok(id)
    }

    pub fn delete(&mut self, ids: &[NodeId]) -> Result<usize, SessionError> {
        self.ensure_unlocked()?;
        let removed = edit::remove(&mut self.forest, ids)?;
        self.selection.clear();
        self.after_edit();
        Ok(removed)
    }

    pub fn update_node(&mut self, id: &NodeId, update: NodeUpdate) -> Result<(), SessionError> {
        self.ensure_unlocked()?;
        edit::update(&mut self.forest, id, update)?;
        self.after_edit();
        Ok(())
    }

    /// Changes the selection. It is recorded with the next commit.
    pub fn select(&mut self, id: &NodeId, mode: SelectMode) -> Result<(), SessionError> {
        self.ensure_unlocked()?;
        if TreeNode::find(&self.forest, id).is_none() {
            return Err(SessionError::NodeNotFound { id: id.clone() });
        }
        self.selection.apply(&self.forest, id, mode);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    fn ensure_unlocked(&self) -> Result<(), SessionError> {
        if self.locked {
            return Err(SessionError::TreeLocked);
        }
        Ok(())
    }

    fn after_edit(&mut self) {
        refresh_paths(&mut self.forest);
        self.text = TextState::valid(self.markdown());
        self.commit();
    }

    fn commit(&mut self) {
        self.history
            .commit(self.selection.snapshot(&self.forest), self.text.clone());
        self.notify_sink();
    }

    fn restore_current(&mut self) {
        let entry = self.history.current();
        self.forest = entry.tree.tree.clone();
        self.selection = Selection::from_state(&entry.tree);
        self.text = entry.text.clone();
        self.locked = false;
        debug!(
            "Restored history entry {} of {}",
            self.history.cursor() + 1,
            self.history.len()
        );
        self.notify_sink();
    }

    fn notify_sink(&mut self) {
        if let Some(sink) = self.sink.as_mut() {
            if let Err(error) = sink.persist(&self.forest) {
                warn!("Failed to persist the tree: {error}");
            }
        }
    }
}
