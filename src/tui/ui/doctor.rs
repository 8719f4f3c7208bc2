//! Doctor dashboard screens.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::application::DoctorSession;
use crate::domain::pharmacy::format_cents;
use crate::domain::{DoctorAppointmentStatus, DoctorView, Language, NoteField, Tab};
use crate::tui::styles::CareTheme;
use crate::tui::ui::{panel, render_empty, render_input, render_prompt, row, rows, ViewState};

/// Cards on the doctor home tab, in display order.
pub const DOCTOR_CARDS: [DoctorView; 4] = [
    DoctorView::Appointments,
    DoctorView::Patients,
    DoctorView::Reports,
    DoctorView::Pharmacy,
];

fn card_label(view: DoctorView) -> &'static str {
    match view {
        DoctorView::Appointments => "Appointment Requests",
        DoctorView::Patients => "My Patients",
        DoctorView::Reports => "Medical Reports",
        DoctorView::Pharmacy => "Pharmacy",
        _ => "",
    }
}

pub fn render_doctor(
    f: &mut Frame,
    area: Rect,
    session: &DoctorSession,
    state: &ViewState,
    language: Language,
) {
    match session.view() {
        DoctorView::Dashboard => match session.nav().tab() {
            Tab::Profile => render_profile(f, area, session, language),
            _ => render_home(f, area, session, state),
        },
        DoctorView::Appointments => render_requests(f, area, session, state),
        DoctorView::PreCall | DoctorView::InCall | DoctorView::EndCall => {
            render_call(f, area, session, state);
        }
        DoctorView::Notes => render_notes(f, area, session, state),
        DoctorView::Reports => render_reports(f, area, session, state),
        DoctorView::Patients => render_patients(f, area, session, state),
        DoctorView::PatientDetail => render_patient_detail(f, area, session, state),
        DoctorView::Pharmacy => render_pharmacy(f, area, session, state),
    }
}

fn render_home(f: &mut Frame, area: Rect, session: &DoctorSession, state: &ViewState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let pending = session
        .appointments()
        .iter()
        .filter(|a| a.status == DoctorAppointmentStatus::Pending)
        .count();
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Today's appointments: ", CareTheme::text_secondary()),
            Span::styled(session.todays_appointments().len().to_string(), CareTheme::title()),
        ]),
        Line::from(vec![
            Span::styled("Active patients: ", CareTheme::text_secondary()),
            Span::styled(session.active_patients().to_string(), CareTheme::title()),
        ]),
        Line::from(vec![
            Span::styled("Pending requests: ", CareTheme::text_secondary()),
            Span::styled(pending.to_string(), CareTheme::warning()),
        ]),
        Line::from(""),
    ];
    lines.extend(DOCTOR_CARDS.iter().enumerate().map(|(i, view)| {
        row(
            i == state.cursor,
            vec![Span::styled(card_label(*view).to_string(), CareTheme::text())],
        )
    }));
    f.render_widget(Paragraph::new(lines).block(panel("Overview")), chunks[0]);

    let today: Vec<Line> = session
        .todays_appointments()
        .iter()
        .map(|a| {
            Line::from(vec![
                Span::styled(format!("{:<10}", a.time), CareTheme::text_secondary()),
                Span::styled(format!("{:<20}", a.patient_name), CareTheme::text()),
                Span::styled(format!("{:<12}", a.kind), CareTheme::text_muted()),
                Span::styled(a.status.to_string(), CareTheme::request_status(a.status)),
            ])
        })
        .collect();
    if today.is_empty() {
        render_empty(f, chunks[1], "Nothing scheduled today");
    } else {
        f.render_widget(Paragraph::new(today).block(panel("Today")), chunks[1]);
    }
}

fn render_profile(f: &mut Frame, area: Rect, session: &DoctorSession, language: Language) {
    let lines = vec![
        Line::from(vec![
            Span::styled("Role: ", CareTheme::text_secondary()),
            Span::styled("Doctor", CareTheme::text()),
        ]),
        Line::from(vec![
            Span::styled("Language: ", CareTheme::text_secondary()),
            Span::styled(format!("{} ({})", language.name, language.native), CareTheme::text()),
        ]),
        Line::from(vec![
            Span::styled("Patients: ", CareTheme::text_secondary()),
            Span::styled(session.patients().len().to_string(), CareTheme::text()),
        ]),
        Line::from(vec![
            Span::styled("Notes saved this session: ", CareTheme::text_secondary()),
            Span::styled(session.saved_notes().len().to_string(), CareTheme::text()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("[O] ", CareTheme::key_hint()),
            Span::styled("Log out", CareTheme::key_desc()),
        ]),
    ];
    f.render_widget(Paragraph::new(lines).block(panel("Profile")), area);
}

fn render_requests(f: &mut Frame, area: Rect, session: &DoctorSession, state: &ViewState) {
    let appointments = session.appointments();
    if appointments.is_empty() {
        render_empty(f, area, "No appointment requests");
        return;
    }
    let cursor = state.clamped(appointments.len());
    let mut lines = Vec::with_capacity(appointments.len() * 2);
    for (i, a) in appointments.iter().enumerate() {
        lines.push(row(
            i == cursor,
            vec![
                Span::styled(format!("{:<18}", a.patient_name), CareTheme::text()),
                Span::styled(format!("{:>3}y  ", a.patient_age), CareTheme::text_muted()),
                Span::styled(format!("{} {}  ", a.date, a.time), CareTheme::text_secondary()),
                Span::styled(format!("{:<10}", a.kind), CareTheme::text_muted()),
                Span::styled(a.status.to_string(), CareTheme::request_status(a.status)),
            ],
        ));
        let actions: Vec<String> = a.available_actions().iter().map(ToString::to_string).collect();
        lines.push(Line::from(Span::styled(
            format!("    {}  ·  {}", a.reason, actions.join(" / ")),
            CareTheme::text_muted(),
        )));
    }
    f.render_widget(
        Paragraph::new(lines).block(panel("Appointment Requests")),
        area,
    );
}

fn render_call(f: &mut Frame, area: Rect, session: &DoctorSession, state: &ViewState) {
    let Some(appointment) = session.call_appointment() else {
        render_empty(f, area, "No appointment selected");
        return;
    };
    let with = &appointment.patient_name;

    let lines = match session.view() {
        DoctorView::PreCall => vec![
            Line::from(Span::styled(format!("Call with {with}"), CareTheme::title())),
            Line::from(Span::styled(appointment.reason.clone(), CareTheme::text_secondary())),
        ],
        DoctorView::InCall => vec![
            Line::from(Span::styled(format!("Connected to {with}"), CareTheme::success())),
            Line::from(""),
            Line::from(vec![
                Span::styled("Microphone: ", CareTheme::text_secondary()),
                Span::styled(if state.muted { "muted" } else { "on" }, CareTheme::text()),
                Span::styled("   Camera: ", CareTheme::text_secondary()),
                Span::styled(if state.camera_off { "off" } else { "on" }, CareTheme::text()),
            ]),
        ],
        _ => vec![
            Line::from(Span::styled("Call ended", CareTheme::title())),
            Line::from(Span::styled(
                format!("Consultation with {with} is over. Add notes while it is fresh."),
                CareTheme::text_secondary(),
            )),
        ],
    };
    f.render_widget(Paragraph::new(lines).block(panel("Video Consultation")), area);
}

fn render_notes(f: &mut Frame, area: Rect, session: &DoctorSession, state: &ViewState) {
    let chunks = rows(area, &[2, 3, 3, 3, 3]);
    let header = session
        .call_appointment()
        .map_or_else(|| "General notes".to_string(), |a| format!("Notes for {}", a.patient_name));
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(header, CareTheme::subtitle()))),
        chunks[0],
    );

    let draft = session.draft();
    for (i, field) in NoteField::ALL.iter().enumerate() {
        render_input(
            f,
            chunks[i + 1],
            field.label(),
            draft.get(*field),
            "",
            state.field == i,
            false,
        );
    }
}

fn render_reports(f: &mut Frame, area: Rect, session: &DoctorSession, state: &ViewState) {
    let reports = session.reports();
    if reports.is_empty() {
        render_empty(f, area, "No reports");
        return;
    }
    let cursor = state.clamped(reports.len());
    let lines: Vec<Line> = reports
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let subject = r.subject.as_ref().map_or("", |s| s.name.as_str());
            row(
                i == cursor,
                vec![
                    Span::styled(format!("{:<26}", r.name), CareTheme::text()),
                    Span::styled(format!("{:<18}", subject), CareTheme::text_secondary()),
                    Span::styled(format!("{:<12}", r.date), CareTheme::text_muted()),
                    Span::styled(r.status.to_string(), CareTheme::report_status(r.status)),
                ],
            )
        })
        .collect();
    f.render_widget(Paragraph::new(lines).block(panel("Medical Reports")), area);
}

fn render_patients(f: &mut Frame, area: Rect, session: &DoctorSession, state: &ViewState) {
    let chunks = rows(area, &[3]);
    render_prompt(f, chunks[0], state);

    let patients = session.search_patients(&state.query);
    if patients.is_empty() {
        render_empty(f, chunks[1], "No patients found");
        return;
    }
    let cursor = state.clamped(patients.len());
    let lines: Vec<Line> = patients
        .iter()
        .enumerate()
        .map(|(i, p)| {
            row(
                i == cursor,
                vec![
                    Span::styled(format!("{:<20}", p.name), CareTheme::text()),
                    Span::styled(format!("{:>3}y  ", p.age), CareTheme::text_muted()),
                    Span::styled(format!("{:<20}", p.condition), CareTheme::text_secondary()),
                    Span::styled(format!("{:<12}", p.last_visit), CareTheme::text_muted()),
                    Span::styled(p.status.to_string(), CareTheme::patient_status(p.status)),
                ],
            )
        })
        .collect();
    f.render_widget(Paragraph::new(lines).block(panel("Patients")), chunks[1]);
}

fn render_patient_detail(f: &mut Frame, area: Rect, session: &DoctorSession, state: &ViewState) {
    let Some(patient) = session.selected_patient() else {
        render_empty(f, area, "No patient selected");
        return;
    };

    let chunks = rows(area, &[6, 3]);
    let info = vec![
        Line::from(Span::styled(patient.name.clone(), CareTheme::title())),
        Line::from(vec![
            Span::styled(format!("{} years · ", patient.age), CareTheme::text_secondary()),
            Span::styled(patient.condition.clone(), CareTheme::text()),
        ]),
        Line::from(vec![
            Span::styled("Last visit ", CareTheme::text_secondary()),
            Span::styled(patient.last_visit.clone(), CareTheme::text()),
            Span::styled("  Phone ", CareTheme::text_secondary()),
            Span::styled(patient.phone.clone(), CareTheme::text()),
        ]),
        Line::from(Span::styled(
            patient.status.to_string(),
            CareTheme::patient_status(patient.status),
        )),
    ];
    f.render_widget(Paragraph::new(info).block(panel("Patient")), chunks[0]);

    if state.input.is_some() {
        render_prompt(f, chunks[1], state);
    } else {
        f.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("[U] ", CareTheme::key_hint()),
                Span::styled("Upload a document", CareTheme::key_desc()),
            ])),
            chunks[1],
        );
    }

    if patient.documents.is_empty() {
        render_empty(f, chunks[2], "No documents");
        return;
    }
    let cursor = state.clamped(patient.documents.len());
    let docs: Vec<Line> = patient
        .documents
        .iter()
        .enumerate()
        .map(|(i, d)| {
            row(
                i == cursor,
                vec![
                    Span::styled(format!("{:<24}", d.name), CareTheme::text()),
                    Span::styled(d.summary.clone(), CareTheme::text_secondary()),
                ],
            )
        })
        .collect();
    f.render_widget(
        Paragraph::new(docs)
            .wrap(Wrap { trim: true })
            .block(panel("Documents")),
        chunks[2],
    );
}

fn render_pharmacy(f: &mut Frame, area: Rect, session: &DoctorSession, state: &ViewState) {
    let chunks = rows(area, &[3]);
    render_prompt(f, chunks[0], state);

    let medicines: Vec<_> = session
        .medicines()
        .iter()
        .filter(|m| m.matches(&state.query, "all"))
        .collect();
    if medicines.is_empty() {
        render_empty(f, chunks[1], "No medicines match");
        return;
    }
    let cursor = state.clamped(medicines.len());
    let lines: Vec<Line> = medicines
        .iter()
        .enumerate()
        .map(|(i, m)| {
            row(
                i == cursor,
                vec![
                    Span::styled(format!("{:<18}", m.name), CareTheme::text()),
                    Span::styled(format!("{:<22}", m.generic_name), CareTheme::text_secondary()),
                    Span::styled(format!("{:<14}", m.category), CareTheme::text_muted()),
                    Span::styled(format_cents(m.price_cents), CareTheme::title()),
                ],
            )
        })
        .collect();
    f.render_widget(Paragraph::new(lines).block(panel("Pharmacy")), chunks[1]);
}
