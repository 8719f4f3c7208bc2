//! Patient dashboard screens.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::application::sessions::ScannerStep;
use crate::application::PatientSession;
use crate::domain::pharmacy::{format_cents, CATEGORIES};
use crate::domain::{Language, PatientView, Tab, VisitKind, TIME_SLOTS};
use crate::tui::styles::CareTheme;
use crate::tui::ui::{panel, render_empty, render_input, render_prompt, row, rows, ViewState};

/// Cards on the patient home tab, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatientCard {
    BookAppointment,
    Appointments,
    VideoCall,
    Reports,
    ScanDocument,
    Pharmacy,
    Cart,
}

impl PatientCard {
    pub const ALL: [PatientCard; 7] = [
        Self::BookAppointment,
        Self::Appointments,
        Self::VideoCall,
        Self::Reports,
        Self::ScanDocument,
        Self::Pharmacy,
        Self::Cart,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::BookAppointment => "Book Appointment",
            Self::Appointments => "My Appointments",
            Self::VideoCall => "Video Calls",
            Self::Reports => "Medical Reports",
            Self::ScanDocument => "Scan Document",
            Self::Pharmacy => "Pharmacy",
            Self::Cart => "Cart",
        }
    }
}

/// Fields of the booking form, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingField {
    Doctor,
    Date,
    Time,
    Kind,
    Reason,
}

impl BookingField {
    pub const ALL: [BookingField; 5] = [
        Self::Doctor,
        Self::Date,
        Self::Time,
        Self::Kind,
        Self::Reason,
    ];

    /// Fields edited by typing rather than cycling.
    #[must_use]
    pub fn is_text(self) -> bool {
        matches!(self, Self::Date | Self::Reason)
    }
}

pub fn render_patient(
    f: &mut Frame,
    area: Rect,
    session: &PatientSession,
    state: &ViewState,
    language: Language,
) {
    match session.view() {
        PatientView::Dashboard => match session.nav().tab() {
            Tab::Profile => render_profile(f, area, session, language),
            _ => render_home(f, area, session, state),
        },
        PatientView::BookAppointment => render_booking(f, area, session, state),
        PatientView::AppointmentList => render_appointments(f, area, session, state),
        PatientView::PreCall | PatientView::InCall | PatientView::EndCall => {
            render_call(f, area, session, state);
        }
        PatientView::ScanDocument => render_scanner(f, area, session, state),
        PatientView::ReportsList => render_reports(f, area, session, state),
        PatientView::ReportDetail => render_report_detail(f, area, session),
        PatientView::MedicineList => render_medicines(f, area, session, state),
        PatientView::MedicineDetail => render_medicine_detail(f, area, session, state),
        PatientView::Cart => render_cart(f, area, session, state),
        PatientView::OrderConfirmation => render_order(f, area, session),
    }
}

fn render_home(f: &mut Frame, area: Rect, session: &PatientSession, state: &ViewState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let cards: Vec<Line> = PatientCard::ALL
        .iter()
        .enumerate()
        .map(|(i, card)| {
            let mut spans = vec![Span::styled(card.label().to_string(), CareTheme::text())];
            if *card == PatientCard::Cart && !session.cart().is_empty() {
                spans.push(Span::styled(
                    format!(" ({})", session.cart().len()),
                    CareTheme::info(),
                ));
            }
            row(i == state.cursor, spans)
        })
        .collect();
    f.render_widget(Paragraph::new(cards).block(panel("Quick Actions")), chunks[0]);

    let mut upcoming: Vec<Line> = vec![Line::from(vec![
        Span::styled("Upcoming appointments: ", CareTheme::text_secondary()),
        Span::styled(session.upcoming_count().to_string(), CareTheme::title()),
    ])];
    upcoming.push(Line::from(""));
    for a in session
        .appointments()
        .iter()
        .filter(|a| a.status == crate::domain::AppointmentStatus::Upcoming)
    {
        upcoming.push(Line::from(vec![
            Span::styled(format!("{} ", a.doctor_name), CareTheme::text()),
            Span::styled(format!("{} · ", a.specialty), CareTheme::text_secondary()),
            Span::styled(format!("{} {} ({})", a.date, a.time, a.kind), CareTheme::text_muted()),
        ]));
    }
    f.render_widget(
        Paragraph::new(upcoming)
            .wrap(Wrap { trim: true })
            .block(panel("Your Health")),
        chunks[1],
    );
}

fn render_profile(f: &mut Frame, area: Rect, session: &PatientSession, language: Language) {
    let lines = vec![
        Line::from(vec![
            Span::styled("Role: ", CareTheme::text_secondary()),
            Span::styled("Patient", CareTheme::text()),
        ]),
        Line::from(vec![
            Span::styled("Language: ", CareTheme::text_secondary()),
            Span::styled(format!("{} ({})", language.name, language.native), CareTheme::text()),
        ]),
        Line::from(vec![
            Span::styled("Appointments: ", CareTheme::text_secondary()),
            Span::styled(session.appointments().len().to_string(), CareTheme::text()),
        ]),
        Line::from(vec![
            Span::styled("Reports: ", CareTheme::text_secondary()),
            Span::styled(session.reports().len().to_string(), CareTheme::text()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("[O] ", CareTheme::key_hint()),
            Span::styled("Log out", CareTheme::key_desc()),
        ]),
    ];
    f.render_widget(Paragraph::new(lines).block(panel("Profile")), area);
}

fn render_booking(f: &mut Frame, area: Rect, session: &PatientSession, state: &ViewState) {
    let form = &state.booking;
    let chunks = rows(area, &[3, 3, 3, 3, 3]);

    let doctor = form
        .doctor_id
        .as_deref()
        .and_then(|id| session.doctors().iter().find(|d| d.id == id))
        .map(|d| format!("◀ {} · {} ▶", d.name, d.specialty))
        .unwrap_or_default();
    let time = form
        .time
        .as_deref()
        .map(|t| format!("◀ {t} ▶"))
        .unwrap_or_default();
    let kind = match form.kind {
        VisitKind::InPerson => "◀ In-person ▶",
        VisitKind::Video => "◀ Video consultation ▶",
    };

    for (i, field) in BookingField::ALL.iter().enumerate() {
        let focused = state.field == i;
        let (label, value, hint) = match field {
            BookingField::Doctor => ("Doctor", doctor.as_str(), "←/→ to choose a doctor"),
            BookingField::Date => ("Date", form.date.as_str(), "e.g. 2026-10-20"),
            BookingField::Time => ("Time", time.as_str(), "←/→ to choose a slot"),
            BookingField::Kind => ("Visit type", kind, ""),
            BookingField::Reason => ("Reason", form.reason.as_str(), "optional"),
        };
        render_input(f, chunks[i], label, value, hint, focused, false);
    }

    let slots = TIME_SLOTS.join("  ");
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(slots, CareTheme::text_muted())))
            .wrap(Wrap { trim: true })
            .block(panel("Available slots")),
        chunks[5],
    );
}

fn render_appointments(f: &mut Frame, area: Rect, session: &PatientSession, state: &ViewState) {
    let appointments = session.appointments();
    if appointments.is_empty() {
        render_empty(f, area, "No appointments yet");
        return;
    }
    let cursor = state.clamped(appointments.len());
    let lines: Vec<Line> = appointments
        .iter()
        .enumerate()
        .map(|(i, a)| {
            let mut spans = vec![
                Span::styled(format!("{:<22}", a.doctor_name), CareTheme::text()),
                Span::styled(format!("{:<18}", a.specialty), CareTheme::text_secondary()),
                Span::styled(format!("{} {} ", a.date, a.time), CareTheme::text_muted()),
                Span::styled(format!("[{}]", a.status), CareTheme::appointment_status(a.status)),
            ];
            if a.is_joinable() {
                spans.push(Span::styled("  Join Video Call", CareTheme::success()));
            }
            row(i == cursor, spans)
        })
        .collect();
    f.render_widget(Paragraph::new(lines).block(panel("My Appointments")), area);
}

fn render_call(f: &mut Frame, area: Rect, session: &PatientSession, state: &ViewState) {
    let with = session
        .call_appointment()
        .map_or_else(|| "Quick consultation".to_string(), |a| a.doctor_name.clone());

    let lines = match session.view() {
        PatientView::PreCall => vec![
            Line::from(Span::styled(format!("Call with {with}"), CareTheme::title())),
            Line::from(""),
            Line::from(Span::styled(
                "Check your camera and microphone before joining.",
                CareTheme::text_secondary(),
            )),
        ],
        PatientView::InCall => vec![
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
            Line::from(""),
            Line::from(Span::styled(
                format!("Thank you for consulting with {with}."),
                CareTheme::text_secondary(),
            )),
        ],
    };
    f.render_widget(Paragraph::new(lines).block(panel("Video Consultation")), area);
}

fn render_scanner(f: &mut Frame, area: Rect, session: &PatientSession, state: &ViewState) {
    let chunks = rows(area, &[5, 3]);
    let step = session.scanner_step();
    let steps: Vec<Span> = [
        (ScannerStep::Scan, "1 Scan"),
        (ScannerStep::Crop, "2 Crop"),
        (ScannerStep::Confirm, "3 Confirm"),
    ]
    .iter()
    .map(|(s, label)| {
        let style = if *s == step {
            CareTheme::tab_active()
        } else {
            CareTheme::text_muted()
        };
        Span::styled(format!(" {label} "), style)
    })
    .collect();

    let hint = match step {
        ScannerStep::Scan => "Position the document in the frame. Enter captures, F picks a file.",
        ScannerStep::Crop => "Adjust the crop area. Enter continues.",
        ScannerStep::Confirm => "Name the document and press Enter to save.",
    };
    let mut lines = vec![
        Line::from(steps),
        Line::from(""),
        Line::from(Span::styled(hint, CareTheme::text_secondary())),
    ];
    if let Some(capture) = session.pending_capture() {
        lines.push(Line::from(vec![
            Span::styled("File: ", CareTheme::text_secondary()),
            Span::styled(capture.label.clone(), CareTheme::text()),
        ]));
    }
    f.render_widget(Paragraph::new(lines).block(panel("Document Scanner")), chunks[0]);

    if state.input.is_some() {
        render_prompt(f, chunks[1], state);
    } else if step == ScannerStep::Confirm {
        render_input(f, chunks[1], "Document name", &state.buffer, "Medical Report", true, false);
    }
}

fn render_reports(f: &mut Frame, area: Rect, session: &PatientSession, state: &ViewState) {
    let chunks = rows(area, &[3]);
    render_prompt(f, chunks[0], state);

    let reports = session.search_reports(&state.query);
    if reports.is_empty() {
        render_empty(f, chunks[1], "No reports found");
        return;
    }
    let cursor = state.clamped(reports.len());
    let lines: Vec<Line> = reports
        .iter()
        .enumerate()
        .map(|(i, r)| {
            row(
                i == cursor,
                vec![
                    Span::styled(format!("{:<28}", r.name), CareTheme::text()),
                    Span::styled(format!("{:<18}", r.kind), CareTheme::text_secondary()),
                    Span::styled(format!("{:<12}", r.date), CareTheme::text_muted()),
                    Span::styled(r.status.to_string(), CareTheme::report_status(r.status)),
                ],
            )
        })
        .collect();
    f.render_widget(Paragraph::new(lines).block(panel("Medical Reports")), chunks[1]);
}

fn render_report_detail(f: &mut Frame, area: Rect, session: &PatientSession) {
    let Some(report) = session.selected_report() else {
        render_empty(f, area, "No report selected");
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(report.name.clone(), CareTheme::title())),
        Line::from(Span::styled(
            format!("{} · {}", report.kind, report.date),
            CareTheme::text_secondary(),
        )),
    ];
    if let Some(subject) = &report.subject {
        lines.push(Line::from(Span::styled(
            format!(
                "Patient: {} · {} · DOB {} · Record {}",
                subject.name, subject.gender, subject.dob, subject.record
            ),
            CareTheme::text_muted(),
        )));
    }
    if let Some(url) = &report.url {
        lines.push(Line::from(Span::styled(url.clone(), CareTheme::info())));
    }
    lines.push(Line::from(""));

    match session.selected_report_detail() {
        Some(detail) if !detail.results.is_empty() => {
            lines.push(Line::from(Span::styled(
                format!("Ordered by {} at {}", detail.doctor, detail.lab),
                CareTheme::text_secondary(),
            )));
            for result in &detail.results {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {:<20}", result.test), CareTheme::text()),
                    Span::styled(format!("{:<14}", result.value), CareTheme::title()),
                    Span::styled(format!("{:<16}", result.range), CareTheme::text_muted()),
                    Span::styled(result.flag.to_string(), CareTheme::result_flag(result.flag)),
                ]));
            }
            let abnormal = detail.abnormal().count();
            if abnormal > 0 {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("{abnormal} result(s) outside the normal range. Discuss with your doctor."),
                    CareTheme::warning(),
                )));
            }
        }
        _ => lines.push(Line::from(Span::styled(
            "No lab results attached to this report.",
            CareTheme::text_muted(),
        ))),
    }

    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(panel("Report")),
        area,
    );
}

fn render_medicines(f: &mut Frame, area: Rect, session: &PatientSession, state: &ViewState) {
    let chunks = rows(area, &[3, 1]);
    render_prompt(f, chunks[0], state);

    let categories: Vec<Span> = CATEGORIES
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let style = if i == state.category {
                CareTheme::tab_active()
            } else {
                CareTheme::text_muted()
            };
            Span::styled(format!(" {c} "), style)
        })
        .collect();
    f.render_widget(Paragraph::new(Line::from(categories)), chunks[1]);

    let category = CATEGORIES.get(state.category).copied().unwrap_or("all");
    let medicines = session.search_medicines(&state.query, category);
    if medicines.is_empty() {
        render_empty(f, chunks[2], "No medicines match");
        return;
    }
    let cursor = state.clamped(medicines.len());
    let lines: Vec<Line> = medicines
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let mut spans = vec![
                Span::styled(format!("{:<18}", m.name), CareTheme::text()),
                Span::styled(format!("{:<22}", m.generic_name), CareTheme::text_secondary()),
                Span::styled(format!("{:>8}  ", format_cents(m.price_cents)), CareTheme::title()),
            ];
            if !m.in_stock {
                spans.push(Span::styled("out of stock ", CareTheme::danger()));
            }
            if m.prescription {
                spans.push(Span::styled("Rx", CareTheme::warning()));
            }
            row(i == cursor, spans)
        })
        .collect();
    f.render_widget(Paragraph::new(lines).block(panel("Pharmacy")), chunks[2]);
}

fn render_medicine_detail(f: &mut Frame, area: Rect, session: &PatientSession, state: &ViewState) {
    let Some(medicine) = session.selected_medicine() else {
        render_empty(f, area, "No medicine selected");
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(medicine.name.clone(), CareTheme::title())),
        Line::from(Span::styled(
            format!("{} · {}", medicine.generic_name, format_cents(medicine.price_cents)),
            CareTheme::text_secondary(),
        )),
    ];
    if medicine.prescription {
        lines.push(Line::from(Span::styled("Prescription required", CareTheme::warning())));
    }
    lines.push(Line::from(""));

    if let Some(detail) = session.selected_medicine_detail() {
        lines.push(Line::from(Span::styled(detail.description, CareTheme::text())));
        lines.push(Line::from(vec![
            Span::styled("Dosage: ", CareTheme::subtitle()),
            Span::styled(detail.dosage, CareTheme::text()),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Side effects: ", CareTheme::subtitle()),
            Span::styled(detail.side_effects.join(", "), CareTheme::text()),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Warnings: ", CareTheme::subtitle()),
            Span::styled(detail.warnings.join(", "), CareTheme::text()),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Ingredients: ", CareTheme::subtitle()),
            Span::styled(detail.ingredients, CareTheme::text()),
        ]));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![
        Span::styled("Quantity: ", CareTheme::text_secondary()),
        Span::styled(format!("- {} +", state.quantity), CareTheme::focused()),
        Span::styled(
            format!(
                "   Total {}",
                format_cents(medicine.price_cents * u64::from(state.quantity))
            ),
            CareTheme::title(),
        ),
    ]));

    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(panel("Medicine")),
        area,
    );
}

fn render_cart(f: &mut Frame, area: Rect, session: &PatientSession, state: &ViewState) {
    let cart = session.cart();
    if cart.is_empty() {
        render_empty(f, area, "Your cart is empty");
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(6)])
        .split(area);

    let cursor = state.clamped(cart.len());
    let lines: Vec<Line> = cart
        .items()
        .iter()
        .enumerate()
        .map(|(i, item)| {
            row(
                i == cursor,
                vec![
                    Span::styled(format!("{:<20}", item.name), CareTheme::text()),
                    Span::styled(format!("x{:<4}", item.quantity), CareTheme::text_secondary()),
                    Span::styled(format_cents(item.line_total_cents()), CareTheme::title()),
                ],
            )
        })
        .collect();
    f.render_widget(Paragraph::new(lines).block(panel("Cart")), chunks[0]);

    let delivery = match cart.delivery_fee_cents() {
        0 => "Free".to_string(),
        fee => format_cents(fee),
    };
    let mut summary = vec![
        Line::from(format!("Subtotal  {}", format_cents(cart.subtotal_cents()))),
        Line::from(format!("Delivery  {delivery}")),
        Line::from(Span::styled(
            format!("Total     {}", format_cents(cart.total_cents())),
            CareTheme::title(),
        )),
    ];
    if cart.requires_prescription() {
        summary.push(Line::from(Span::styled(
            "Some items need a prescription on delivery.",
            CareTheme::warning(),
        )));
    }
    f.render_widget(Paragraph::new(summary).block(panel("Summary")), chunks[1]);
}

fn render_order(f: &mut Frame, area: Rect, session: &PatientSession) {
    let Some(order) = session.last_order() else {
        render_empty(f, area, "No order placed");
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled("Order placed successfully!", CareTheme::success())),
        Line::from(""),
        Line::from(vec![
            Span::styled("Order ", CareTheme::text_secondary()),
            Span::styled(order.id.clone(), CareTheme::title()),
        ]),
        Line::from(format!(
            "Estimated delivery {}",
            order.estimated_delivery.format("%b %e, %Y")
        )),
        Line::from(""),
    ];
    for item in &order.items {
        lines.push(Line::from(format!(
            "  {} x{}  {}",
            item.name,
            item.quantity,
            format_cents(item.line_total_cents())
        )));
    }
    lines.push(Line::from(Span::styled(
        format!("Total paid {}", format_cents(order.total_cents)),
        CareTheme::title(),
    )));
    f.render_widget(Paragraph::new(lines).block(panel("Order Confirmation")), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_text_fields() {
        let text: Vec<_> = BookingField::ALL.iter().filter(|f| f.is_text()).collect();
        assert_eq!(text, vec![&BookingField::Date, &BookingField::Reason]);
    }
}
