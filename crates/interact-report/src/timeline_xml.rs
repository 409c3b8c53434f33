//! Timeline tree artifact: patient → administration → medication.
//!
//! ```text
//! <timeline>
//!   <!-- … -->
//!   <patient id="P1">
//!     <administration timestamp="2024-01-01 08:00:00">
//!       <medication name="Aspirin"/>
//!     </administration>
//!   </patient>
//! </timeline>
//! ```
//!
//! Administrations of one patient that share a timestamp are written as a
//! single node. Identifiers and names are attributes, so any spelling is safe.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use chrono::NaiveDateTime;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use tracing::info;

use interact_engine::EventTimeline;
use interact_model::AdministrationEvent;

use crate::error::{ReportError, Result};
use crate::lists::ensure_parent_dir;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const ROOT: &str = "timeline";
const PATIENT: &str = "patient";
const ADMINISTRATION: &str = "administration";
const MEDICATION: &str = "medication";
const COMMENT: &str = " Medications administered per patient per timestamp ";

pub fn write_timeline_xml(path: &Path, timeline: &EventTimeline) -> Result<()> {
    ensure_parent_dir(path)?;
    let write_error = |source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    render_timeline_xml(&mut writer, timeline)?;
    writer.flush().map_err(write_error)?;
    info!(
        path = %path.display(),
        patients = timeline.patient_count(),
        "wrote timeline tree"
    );
    Ok(())
}

pub fn render_timeline_xml<W: Write>(out: W, timeline: &EventTimeline) -> Result<()> {
    let mut xml = Writer::new_with_indent(out, b' ', 2);
    emit(&mut xml, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    emit(&mut xml, Event::Start(BytesStart::new(ROOT)))?;
    emit(&mut xml, Event::Comment(BytesText::new(COMMENT)))?;

    for (patient_id, events) in timeline.patients() {
        let mut patient = BytesStart::new(PATIENT);
        patient.push_attribute(("id", patient_id));
        emit(&mut xml, Event::Start(patient))?;

        for group in events.chunk_by(|a, b| a.timestamp() == b.timestamp()) {
            let timestamp = group[0].timestamp().format(TIMESTAMP_FORMAT).to_string();
            let mut administration = BytesStart::new(ADMINISTRATION);
            administration.push_attribute(("timestamp", timestamp.as_str()));
            emit(&mut xml, Event::Start(administration))?;
            for name in group.iter().flat_map(AdministrationEvent::medications) {
                let mut medication = BytesStart::new(MEDICATION);
                medication.push_attribute(("name", name.as_str()));
                emit(&mut xml, Event::Empty(medication))?;
            }
            emit(&mut xml, Event::End(BytesEnd::new(ADMINISTRATION)))?;
        }

        emit(&mut xml, Event::End(BytesEnd::new(PATIENT)))?;
    }

    emit(&mut xml, Event::End(BytesEnd::new(ROOT)))?;
    xml.get_mut()
        .write_all(b"\n")
        .map_err(|e| ReportError::Xml {
            position: 0,
            message: e.to_string(),
        })
}

/// Loads a timeline tree previously written by [`write_timeline_xml`].
pub fn read_timeline_xml(path: &Path) -> Result<EventTimeline> {
    let file = File::open(path).map_err(|source| ReportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let timeline = parse_timeline_xml(BufReader::new(file))?;
    info!(
        path = %path.display(),
        patients = timeline.patient_count(),
        events = timeline.event_count(),
        "timeline tree loaded"
    );
    Ok(timeline)
}

pub fn parse_timeline_xml<R: BufRead>(source: R) -> Result<EventTimeline> {
    let mut reader = Reader::from_reader(source);
    let mut buf = Vec::new();
    let mut events = Vec::new();
    let mut patient: Option<String> = None;
    let mut administration: Option<(NaiveDateTime, Vec<String>)> = None;

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| ReportError::Xml {
                position: reader.error_position(),
                message: e.to_string(),
            })?;
        match event {
            Event::Start(ref element) | Event::Empty(ref element) => {
                match element.local_name().as_ref() {
                    b"patient" => patient = Some(required_attribute(element, "id")?),
                    b"administration" => {
                        let raw = required_attribute(element, "timestamp")?;
                        let timestamp = NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT)
                            .map_err(|_| {
                                ReportError::InvalidTree(format!("bad timestamp '{raw}'"))
                            })?;
                        administration = Some((timestamp, Vec::new()));
                    }
                    b"medication" => {
                        let name = required_attribute(element, "name")?;
                        let (_, medications) = administration.as_mut().ok_or_else(|| {
                            ReportError::InvalidTree(format!(
                                "medication '{name}' outside an administration"
                            ))
                        })?;
                        medications.push(name);
                    }
                    _ => {}
                }
                if matches!(event, Event::Empty(_)) {
                    close(element.local_name().as_ref(), &mut patient, &mut administration, &mut events)?;
                }
            }
            Event::End(ref element) => {
                close(element.local_name().as_ref(), &mut patient, &mut administration, &mut events)?;
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(EventTimeline::from_events(events))
}

fn close(
    local_name: &[u8],
    patient: &mut Option<String>,
    administration: &mut Option<(NaiveDateTime, Vec<String>)>,
    events: &mut Vec<AdministrationEvent>,
) -> Result<()> {
    match local_name {
        b"patient" => *patient = None,
        b"administration" => {
            let Some((timestamp, medications)) = administration.take() else {
                return Ok(());
            };
            let patient_id = patient.as_deref().ok_or_else(|| {
                ReportError::InvalidTree("administration outside a patient".to_string())
            })?;
            let event = AdministrationEvent::new(timestamp, patient_id, medications)
                .map_err(|e| ReportError::InvalidTree(e.to_string()))?;
            events.push(event);
        }
        _ => {}
    }
    Ok(())
}

fn required_attribute(element: &BytesStart<'_>, name: &str) -> Result<String> {
    let attribute = element
        .try_get_attribute(name)
        .map_err(|e| ReportError::InvalidTree(e.to_string()))?
        .ok_or_else(|| {
            ReportError::InvalidTree(format!(
                "<{}> without '{name}'",
                String::from_utf8_lossy(element.local_name().as_ref())
            ))
        })?;
    let value = attribute
        .unescape_value()
        .map_err(|e| ReportError::InvalidTree(e.to_string()))?;
    Ok(value.into_owned())
}

fn emit<W: Write>(xml: &mut Writer<W>, event: Event<'_>) -> Result<()> {
    xml.write_event(event).map_err(|e| ReportError::Xml {
        position: 0,
        message: e.to_string(),
    })
}
