//! Static data source: built-in demo collections.
//!
//! Every call returns fresh owned copies, so sessions can mutate their
//! collections without affecting one another.

use crate::domain::{
    Appointment, AppointmentStatus, Doctor, DoctorAppointment, DoctorAppointmentStatus, LabResult,
    Medicine, MedicineDetail, PatientDocument, PatientRecord, PatientStatus, Report, ReportDetail,
    ReportStatus, ReportSubject, ResultFlag, VisitKind,
};
use crate::ports::CareDataSource;

#[derive(Debug, Clone, Copy, Default)]
pub struct StaticDataSource;

impl StaticDataSource {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn s(value: &str) -> String {
    value.to_string()
}

fn appointment(
    id: &str,
    doctor: &str,
    specialty: &str,
    date: &str,
    time: &str,
    status: AppointmentStatus,
    kind: VisitKind,
    reason: &str,
) -> Appointment {
    Appointment {
        id: s(id),
        doctor_name: s(doctor),
        specialty: s(specialty),
        date: s(date),
        time: s(time),
        status,
        kind,
        reason: Some(s(reason)),
    }
}

fn request(
    id: &str,
    patient: &str,
    age: u32,
    date: &str,
    time: &str,
    status: DoctorAppointmentStatus,
    kind: VisitKind,
    reason: &str,
) -> DoctorAppointment {
    DoctorAppointment {
        id: s(id),
        patient_name: s(patient),
        patient_age: age,
        date: s(date),
        time: s(time),
        status,
        kind,
        reason: s(reason),
    }
}

fn document(id: &str, name: &str, summary: &str) -> PatientDocument {
    PatientDocument {
        id: s(id),
        name: s(name),
        summary: s(summary),
        url: None,
    }
}

fn subject(name: &str, gender: &str, dob: &str, record: &str) -> Option<ReportSubject> {
    Some(ReportSubject {
        name: s(name),
        gender: s(gender),
        dob: s(dob),
        record: s(record),
    })
}

fn medicine(
    id: &str,
    name: &str,
    generic: &str,
    price_cents: u64,
    category: &str,
    in_stock: bool,
    prescription: bool,
) -> Medicine {
    Medicine {
        id: s(id),
        name: s(name),
        generic_name: s(generic),
        price_cents,
        category: s(category),
        in_stock,
        prescription,
    }
}

fn lab(test: &str, value: &str, range: &str, flag: ResultFlag) -> LabResult {
    LabResult {
        test: s(test),
        value: s(value),
        range: s(range),
        flag,
    }
}

impl CareDataSource for StaticDataSource {
    fn patient_appointments(&self) -> Vec<Appointment> {
        use AppointmentStatus::{Completed, Upcoming};
        use VisitKind::{InPerson, Video};
        vec![
            appointment("1", "Dr. Smith", "Cardiology", "Tomorrow", "10:00 AM", Upcoming, Video, "Follow-up consultation"),
            appointment("2", "Dr. Johnson", "General Medicine", "Friday", "2:00 PM", Upcoming, InPerson, "Regular checkup"),
            appointment("3", "Dr. Brown", "Neurology", "Jan 15, 2024", "11:00 AM", Completed, Video, "Headache consultation"),
        ]
    }

    fn doctor_appointments(&self) -> Vec<DoctorAppointment> {
        use DoctorAppointmentStatus::{Accepted, Completed, Pending};
        use VisitKind::{InPerson, Video};
        vec![
            request("1", "John Doe", 34, "Today", "9:00 AM", Accepted, Video, "Follow-up consultation"),
            request("2", "Mary Smith", 28, "Today", "10:30 AM", Pending, InPerson, "Regular checkup"),
            request("3", "Robert Johnson", 45, "Tomorrow", "2:00 PM", Accepted, Video, "Heart palpitations"),
            request("4", "Alice Brown", 52, "Yesterday", "11:00 AM", Completed, Video, "Blood pressure check"),
        ]
    }

    fn doctors(&self) -> Vec<Doctor> {
        [
            ("1", "Dr. Smith", "Cardiology"),
            ("2", "Dr. Johnson", "General Medicine"),
            ("3", "Dr. Brown", "Neurology"),
            ("4", "Dr. Davis", "Orthopedics"),
        ]
        .into_iter()
        .map(|(id, name, specialty)| Doctor {
            id: s(id),
            name: s(name),
            specialty: s(specialty),
        })
        .collect()
    }

    fn patients(&self) -> Vec<PatientRecord> {
        vec![
            PatientRecord {
                id: s("1"),
                name: s("John Doe"),
                age: 45,
                condition: s("Hypertension"),
                last_visit: s("2024-01-15"),
                status: PatientStatus::Active,
                phone: s("+1 (555) 123-4567"),
                documents: vec![
                    document("d1", "Blood Test.pdf", "Shows elevated cholesterol levels."),
                    document("d2", "ECG Report.pdf", "Normal sinus rhythm detected."),
                ],
            },
            PatientRecord {
                id: s("2"),
                name: s("Mary Smith"),
                age: 32,
                condition: s("Diabetes Type 2"),
                last_visit: s("2024-01-12"),
                status: PatientStatus::Active,
                phone: s("+1 (555) 234-5678"),
                documents: vec![document("d3", "Glucose Report.pdf", "Blood sugar levels are stable.")],
            },
            PatientRecord {
                id: s("3"),
                name: s("Robert Johnson"),
                age: 58,
                condition: s("Heart Disease"),
                last_visit: s("2024-01-10"),
                status: PatientStatus::Critical,
                phone: s("+1 (555) 345-6789"),
                documents: Vec::new(),
            },
        ]
    }

    fn reports(&self) -> Vec<Report> {
        let report = |id: &str, name: &str, kind: &str, date: &str, status, subject| Report {
            id: s(id),
            name: s(name),
            kind: s(kind),
            date: s(date),
            status,
            subject,
            url: None,
        };
        vec![
            report("1", "Blood Test Results", "Blood Test", "2024-01-15", ReportStatus::New, subject("Sabrina Welder", "F", "April 8, 1993", "00-991-23")),
            report("2", "Chest X-Ray", "X-Ray", "2024-01-10", ReportStatus::Viewed, subject("John Doe", "M", "May 12, 1987", "01-234-56")),
            report("3", "MRI Brain Scan", "MRI", "2024-01-05", ReportStatus::Viewed, subject("Priya Singh", "F", "Nov 22, 1990", "02-345-67")),
            report("4", "ECG Report", "ECG", "2024-01-01", ReportStatus::Viewed, subject("Alex Kim", "M", "Feb 3, 1975", "03-456-78")),
        ]
    }

    fn report_detail(&self, report_id: &str) -> Option<ReportDetail> {
        let report = self.reports().into_iter().find(|r| r.id == report_id)?;
        // Only the blood panel carries itemised results.
        let results = if report.kind == "Blood Test" {
            vec![
                lab("Hemoglobin", "14.2 g/dL", "12.0-15.5", ResultFlag::Normal),
                lab("White Blood Cells", "7,200/μL", "4,500-11,000", ResultFlag::Normal),
                lab("Platelets", "250,000/μL", "150,000-450,000", ResultFlag::Normal),
                lab("Glucose", "110 mg/dL", "70-100", ResultFlag::High),
                lab("Cholesterol", "200 mg/dL", "<200", ResultFlag::Normal),
            ]
        } else {
            Vec::new()
        };
        Some(ReportDetail {
            id: report.id,
            name: report.name,
            kind: report.kind,
            date: report.date,
            doctor: s("Dr. Sarah Johnson"),
            lab: s("City Medical Lab"),
            results,
        })
    }

    fn medicines(&self) -> Vec<Medicine> {
        vec![
            medicine("1", "Paracetamol 500mg", "Acetaminophen", 1299, "pain relief", true, false),
            medicine("2", "Amoxicillin 250mg", "Amoxicillin", 2850, "antibiotics", true, true),
            medicine("3", "Vitamin D3 1000IU", "Cholecalciferol", 1575, "vitamins", true, false),
            medicine("4", "Lisinopril 10mg", "Lisinopril", 2200, "heart", false, true),
            medicine("5", "Metformin 500mg", "Metformin HCl", 1890, "diabetes", true, true),
        ]
    }

    fn medicine_detail(&self, medicine_id: &str) -> Option<MedicineDetail> {
        let med = self.medicines().into_iter().find(|m| m.id == medicine_id)?;
        if med.id == "1" {
            return Some(MedicineDetail {
                description: s("Paracetamol is a pain reliever and fever reducer commonly used to treat headaches, muscle aches, arthritis, backaches, toothaches, colds, and fevers."),
                dosage: s("Adults: 500mg-1000mg every 4-6 hours. Maximum 4000mg per day."),
                side_effects: vec![s("Nausea"), s("Skin rash"), s("Allergic reactions (rare)")],
                warnings: vec![
                    s("Do not exceed recommended dose"),
                    s("Consult doctor if symptoms persist"),
                    s("Keep out of reach of children"),
                ],
                ingredients: s("Active: Paracetamol 500mg, Inactive: Starch, Povidone, Stearic acid"),
            });
        }
        Some(MedicineDetail {
            description: format!("{} ({}) for {}.", med.name, med.generic_name, med.category),
            dosage: s("Take as directed by your doctor or pharmacist."),
            side_effects: Vec::new(),
            warnings: vec![s("Keep out of reach of children")],
            ingredients: format!("Active: {}", med.name),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_collections() {
        let data = StaticDataSource::new();
        assert_eq!(data.patient_appointments().len(), 3);
        assert_eq!(data.doctor_appointments().len(), 4);
        assert_eq!(data.doctors().len(), 4);
        assert_eq!(data.patients().len(), 3);
        assert_eq!(data.reports().len(), 4);
        assert_eq!(data.medicines().len(), 5);
    }

    #[test]
    fn test_report_detail_flags_glucose() {
        let detail = StaticDataSource::new().report_detail("1").expect("known report");
        let abnormal: Vec<_> = detail.abnormal().map(|r| r.test.as_str()).collect();
        assert_eq!(abnormal, vec!["Glucose"]);
        assert!(StaticDataSource::new().report_detail("99").is_none());
    }

    #[test]
    fn test_medicine_detail_lookup() {
        let data = StaticDataSource::new();
        let detail = data.medicine_detail("1").expect("paracetamol");
        assert_eq!(detail.side_effects.len(), 3);
        assert!(data.medicine_detail("4").is_some());
        assert!(data.medicine_detail("nope").is_none());
    }

    #[test]
    fn test_copies_are_independent() {
        let data = StaticDataSource::new();
        let mut first = data.reports();
        first[0].status = ReportStatus::Viewed;
        assert_eq!(data.reports()[0].status, ReportStatus::New);
    }
}
