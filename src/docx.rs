//! Text extraction for Office Open XML word processing documents (`.docx`).
//!
//! A `.docx` file is a zip container whose `word/document.xml` part holds the
//! body. Only paragraphs that sit directly in `w:body` are extracted, in
//! document order, and joined with a single `\n`. Table cells, text boxes and
//! content controls are not part of that paragraph list.
//!
//! Support is compiled in by the `docx` cargo feature. Without it every call
//! fails with [`CountError::CapabilityMissing`].

use std::path::Path;

use crate::error::CountError;

const CAPABILITY: &str = "docx";

/// Fails fast when this build cannot parse `.docx` containers.
pub fn ensure_available() -> Result<(), CountError> {
    if cfg!(feature = "docx") {
        Ok(())
    } else {
        Err(CountError::CapabilityMissing(CAPABILITY))
    }
}

pub fn extract_text(path: &Path) -> Result<String, CountError> {
    ensure_available()?;
    let paragraphs = read_paragraphs(path)?;
    tracing::debug!("extracted {} paragraphs from {}", paragraphs.len(), path.display());
    Ok(paragraphs.join("\n"))
}

#[cfg(not(feature = "docx"))]
fn read_paragraphs(_path: &Path) -> Result<Vec<String>, CountError> {
    Err(CountError::CapabilityMissing(CAPABILITY))
}

#[cfg(feature = "docx")]
fn read_paragraphs(path: &Path) -> Result<Vec<String>, CountError> {
    use std::fs::File;
    use std::io::Read;

    use zip::ZipArchive;

    let malformed = |reason: String| CountError::Malformed {
        path: path.to_path_buf(),
        reason,
    };

    let file = File::open(path).map_err(|source| CountError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut archive =
        ZipArchive::new(file).map_err(|e| malformed(format!("not a zip container: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name(MAIN_PART)
        .map_err(|e| malformed(format!("missing {MAIN_PART}: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| malformed(format!("failed to read {MAIN_PART}: {e}")))?;

    body_paragraphs(&xml).map_err(|e| malformed(format!("{MAIN_PART}: {e}")))
}

#[cfg(feature = "docx")]
const MAIN_PART: &str = "word/document.xml";

#[cfg(feature = "docx")]
const WORDPROCESSING_NS: &[u8] = b"http://schemas.openxmlformats.org/wordprocessingml/2006/main";

#[cfg(feature = "docx")]
#[derive(Debug, thiserror::Error)]
enum BodyError {
    #[error("invalid XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("unexpected end of document")]
    Truncated,
}

/// Local name of a WordprocessingML element; `None` for other namespaces.
#[cfg(feature = "docx")]
type Element = Option<Vec<u8>>;

/// Collects the text of every top-level body paragraph.
///
/// Names are resolved against the WordprocessingML namespace, so the prefix
/// the producer picked (or a default namespace) does not matter.
#[cfg(feature = "docx")]
fn body_paragraphs(xml: &str) -> Result<Vec<String>, BodyError> {
    use quick_xml::NsReader;
    use quick_xml::events::Event;
    use quick_xml::name::{Namespace, ResolveResult};

    let mut reader = NsReader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();
    let mut paragraphs = Vec::new();
    // Depth of the open body paragraph within `stack`, and its text so far.
    let mut current: Option<(usize, String)> = None;

    loop {
        let (ns, event) = reader.read_resolved_event()?;
        let in_wordprocessing =
            matches!(ns, ResolveResult::Bound(Namespace(uri)) if uri == WORDPROCESSING_NS);

        match event {
            Event::Start(e) => {
                let element = in_wordprocessing.then(|| e.local_name().as_ref().to_vec());
                if is_body_paragraph(&element, &stack) {
                    current = Some((stack.len(), String::new()));
                } else if let Some((depth, text)) = current.as_mut() {
                    if is_run_path(&stack[*depth + 1..]) {
                        push_run_marker(&reader, &element, &e, text);
                    }
                }
                stack.push(element);
            }
            Event::Empty(e) => {
                let element = in_wordprocessing.then(|| e.local_name().as_ref().to_vec());
                if is_body_paragraph(&element, &stack) {
                    paragraphs.push(String::new());
                } else if let Some((depth, text)) = current.as_mut() {
                    if is_run_path(&stack[*depth + 1..]) {
                        push_run_marker(&reader, &element, &e, text);
                    }
                }
            }
            Event::End(_) => {
                stack.pop();
                if current
                    .as_ref()
                    .is_some_and(|(depth, _)| *depth == stack.len())
                {
                    if let Some((_, text)) = current.take() {
                        paragraphs.push(text);
                    }
                }
            }
            Event::Text(t) => {
                if let Some((depth, text)) = current.as_mut() {
                    if in_run_text(&stack[*depth + 1..]) {
                        text.push_str(&t.unescape()?);
                    }
                }
            }
            Event::CData(c) => {
                if let Some((depth, text)) = current.as_mut() {
                    if in_run_text(&stack[*depth + 1..]) {
                        text.push_str(&String::from_utf8_lossy(&c));
                    }
                }
            }
            Event::Eof => {
                if !stack.is_empty() || current.is_some() {
                    return Err(BodyError::Truncated);
                }
                break;
            }
            _ => {}
        }
    }

    Ok(paragraphs)
}

#[cfg(feature = "docx")]
fn is(element: &Element, local: &[u8]) -> bool {
    element.as_deref() == Some(local)
}

#[cfg(feature = "docx")]
fn is_body_paragraph(element: &Element, stack: &[Element]) -> bool {
    is(element, b"p") && stack.last().is_some_and(|parent| is(parent, b"body"))
}

/// Elements between a paragraph and a run's children: the run itself,
/// optionally wrapped in a hyperlink.
#[cfg(feature = "docx")]
fn is_run_path(path: &[Element]) -> bool {
    match path {
        [run] => is(run, b"r"),
        [link, run] => is(link, b"hyperlink") && is(run, b"r"),
        _ => false,
    }
}

#[cfg(feature = "docx")]
fn in_run_text(path: &[Element]) -> bool {
    match path {
        [run_path @ .., last] => is(last, b"t") && is_run_path(run_path),
        [] => false,
    }
}

/// Run children that stand for a character rather than carrying text.
#[cfg(feature = "docx")]
fn push_run_marker(
    reader: &quick_xml::NsReader<&[u8]>,
    element: &Element,
    e: &quick_xml::events::BytesStart<'_>,
    text: &mut String,
) {
    use quick_xml::name::{Namespace, ResolveResult};

    match element.as_deref() {
        Some(b"tab" | b"ptab") => text.push('\t'),
        Some(b"cr") => text.push('\n'),
        Some(b"noBreakHyphen") => text.push('-'),
        Some(b"br") => {
            let break_type = e
                .attributes()
                .flatten()
                .find(|attr| {
                    let (ns, local) = reader.resolve_attribute(attr.key);
                    matches!(ns, ResolveResult::Bound(Namespace(uri)) if uri == WORDPROCESSING_NS)
                        && local.as_ref() == b"type"
                })
                .map(|attr| attr.value.into_owned());
            if break_type.is_none_or(|value| value == b"textWrapping") {
                text.push('\n');
            }
        }
        _ => {}
    }
}
