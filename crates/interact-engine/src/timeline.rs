//! Per-patient chronological grouping of administration events.

use std::collections::BTreeMap;

use interact_model::AdministrationEvent;

/// Administration events grouped by patient and ordered by timestamp.
///
/// Events sharing a timestamp keep their input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventTimeline {
    patients: BTreeMap<String, Vec<AdministrationEvent>>,
}

impl EventTimeline {
    pub fn from_events<I>(events: I) -> Self
    where
        I: IntoIterator<Item = AdministrationEvent>,
    {
        let mut patients: BTreeMap<String, Vec<AdministrationEvent>> = BTreeMap::new();
        for event in events {
            patients
                .entry(event.patient_id().to_string())
                .or_default()
                .push(event);
        }
        for events in patients.values_mut() {
            // `sort_by_key` is stable, which keeps ties in input order.
            events.sort_by_key(AdministrationEvent::timestamp);
        }
        Self { patients }
    }

    /// Patients in identifier order with their sorted events.
    pub fn patients(&self) -> impl Iterator<Item = (&str, &[AdministrationEvent])> {
        self.patients
            .iter()
            .map(|(patient, events)| (patient.as_str(), events.as_slice()))
    }

    pub fn events(&self, patient_id: &str) -> Option<&[AdministrationEvent]> {
        self.patients.get(patient_id).map(Vec::as_slice)
    }

    pub fn patient_count(&self) -> usize {
        self.patients.len()
    }

    pub fn event_count(&self) -> usize {
        self.patients.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    pub(crate) fn by_patient(&self) -> &BTreeMap<String, Vec<AdministrationEvent>> {
        &self.patients
    }
}

impl FromIterator<AdministrationEvent> for EventTimeline {
    fn from_iter<I: IntoIterator<Item = AdministrationEvent>>(iter: I) -> Self {
        Self::from_events(iter)
    }
}
