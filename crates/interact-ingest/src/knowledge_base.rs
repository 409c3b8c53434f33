//! Streaming reader for DrugBank-style interaction knowledge bases.
//!
//! Every direct child of the document root is one entry. Inside an entry only
//! these paths are read, matched on local names so a default or prefixed
//! namespace makes no difference:
//!
//! ```text
//! <entry>
//!   <name>…</name>
//!   <synonyms><synonym>…</synonym></synonyms>
//!   <drug-interactions>
//!     <drug-interaction><name>…</name><description>…</description></drug-interaction>
//!   </drug-interactions>
//! </entry>
//! ```
//!
//! `name` elements elsewhere in an entry (products, salts, …) are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, Event};
use tracing::{debug, info};

use interact_model::{InteractionFact, KnowledgeBaseEntry};

use crate::error::{IngestError, Result};
use crate::source::io_error;

/// Element roles that matter to the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    Root,
    Entry,
    PrimaryName,
    Synonyms,
    Synonym,
    Interactions,
    Interaction,
    PartnerName,
    Description,
    Other,
}

impl Node {
    fn child(parent: Option<Node>, local_name: &[u8]) -> Node {
        match (parent, local_name) {
            (None, _) => Node::Root,
            (Some(Node::Root), _) => Node::Entry,
            (Some(Node::Entry), b"name") => Node::PrimaryName,
            (Some(Node::Entry), b"synonyms") => Node::Synonyms,
            (Some(Node::Entry), b"drug-interactions") => Node::Interactions,
            (Some(Node::Synonyms), b"synonym") => Node::Synonym,
            (Some(Node::Interactions), b"drug-interaction") => Node::Interaction,
            (Some(Node::Interaction), b"name") => Node::PartnerName,
            (Some(Node::Interaction), b"description") => Node::Description,
            _ => Node::Other,
        }
    }
}

#[derive(Default)]
struct EntryBuilder {
    entries: Vec<KnowledgeBaseEntry>,
    current: Option<KnowledgeBaseEntry>,
    fact: Option<InteractionFact>,
    skipped: usize,
}

impl EntryBuilder {
    fn open(&mut self, node: Node) {
        match node {
            Node::Entry => self.current = Some(KnowledgeBaseEntry::default()),
            Node::Interaction => {
                self.fact = Some(InteractionFact {
                    partner: String::new(),
                    description: String::new(),
                });
            }
            _ => {}
        }
    }

    fn close(&mut self, node: Node, text: &str) {
        match node {
            Node::Entry => {
                if let Some(entry) = self.current.take() {
                    if entry.primary_name.is_empty() {
                        self.skipped += 1;
                    } else {
                        self.entries.push(entry);
                    }
                }
            }
            Node::PrimaryName => {
                if let Some(entry) = self.current.as_mut() {
                    if entry.primary_name.is_empty() {
                        entry.primary_name = text.to_string();
                    }
                }
            }
            Node::Synonym => {
                if let Some(entry) = self.current.as_mut() {
                    if !text.is_empty() {
                        entry.synonyms.push(text.to_string());
                    }
                }
            }
            Node::PartnerName => {
                if let Some(fact) = self.fact.as_mut() {
                    fact.partner = text.to_string();
                }
            }
            Node::Description => {
                if let Some(fact) = self.fact.as_mut() {
                    fact.description = text.to_string();
                }
            }
            Node::Interaction => {
                if let (Some(fact), Some(entry)) = (self.fact.take(), self.current.as_mut()) {
                    entry.interactions.push(fact);
                }
            }
            _ => {}
        }
    }
}

/// Reads every entry of a knowledge-base document, in document order.
pub fn read_knowledge_base(path: &Path) -> Result<Vec<KnowledgeBaseEntry>> {
    let file = File::open(path).map_err(|e| io_error(path, e))?;
    let entries = parse_knowledge_base(BufReader::new(file), path)?;
    info!(path = %path.display(), entries = entries.len(), "knowledge base loaded");
    Ok(entries)
}

/// Parses a knowledge-base document from any buffered source.
///
/// `origin` is only used in error messages.
pub fn parse_knowledge_base<R: BufRead>(
    source: R,
    origin: &Path,
) -> Result<Vec<KnowledgeBaseEntry>> {
    let mut reader = Reader::from_reader(source);
    let mut buf = Vec::new();
    let mut stack: Vec<Node> = Vec::new();
    let mut text = String::new();
    let mut builder = EntryBuilder::default();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| xml_error(origin, reader.error_position(), e))?;
        match event {
            Event::Start(ref element) => {
                let node = Node::child(stack.last().copied(), element.local_name().as_ref());
                builder.open(node);
                stack.push(node);
                text.clear();
            }
            Event::Empty(ref element) => {
                let node = Node::child(stack.last().copied(), element.local_name().as_ref());
                builder.open(node);
                builder.close(node, "");
                text.clear();
            }
            Event::End(_) => {
                if let Some(node) = stack.pop() {
                    builder.close(node, text.trim());
                }
                text.clear();
            }
            Event::Text(ref content) => {
                let decoded = content
                    .decode()
                    .map_err(|e| xml_error(origin, reader.buffer_position(), e))?;
                text.push_str(&decoded);
            }
            Event::CData(ref content) => {
                text.push_str(&String::from_utf8_lossy(content));
            }
            Event::GeneralRef(ref reference) => {
                push_reference(&mut text, reference)
                    .map_err(|e| xml_error(origin, reader.buffer_position(), e))?;
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if builder.skipped > 0 {
        debug!(skipped = builder.skipped, "knowledge-base entries without a name");
    }
    Ok(builder.entries)
}

fn push_reference(text: &mut String, reference: &BytesRef<'_>) -> std::result::Result<(), String> {
    if let Some(ch) = reference.resolve_char_ref().map_err(|e| e.to_string())? {
        text.push(ch);
        return Ok(());
    }
    let name = reference.decode().map_err(|e| e.to_string())?;
    match resolve_predefined_entity(&name) {
        Some(resolved) => text.push_str(resolved),
        None => {
            text.push('&');
            text.push_str(&name);
            text.push(';');
        }
    }
    Ok(())
}

fn xml_error(origin: &Path, position: u64, error: impl ToString) -> IngestError {
    IngestError::Xml {
        path: origin.to_path_buf(),
        position,
        message: error.to_string(),
    }
}
