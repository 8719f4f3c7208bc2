//! Voice intent classification.
//!
//! A transcript is reduced to at most one `VoiceIntent` by checking
//! keywords in a fixed order. When several keywords appear, the earliest
//! rule wins:
//!
//! 1. `appointment` (`book` as well gives `BookAppointment`)
//! 2. `notes`
//! 3. `profile`
//! 4. `home`
//! 5. `pharmacy` / `medicine`
//! 6. `report`
//! 7. `patient`
//! 8. `cart`
//!
//! How an intent maps onto a dashboard is up to each role's view set.

/// A navigation target recognised in a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoiceIntent {
    Appointments,
    BookAppointment,
    Notes,
    Profile,
    Home,
    Pharmacy,
    Reports,
    Patients,
    Cart,
}

const RULES: [(&[&str], VoiceIntent); 7] = [
    (&["notes"], VoiceIntent::Notes),
    (&["profile"], VoiceIntent::Profile),
    (&["home"], VoiceIntent::Home),
    (&["pharmacy", "medicine"], VoiceIntent::Pharmacy),
    (&["report"], VoiceIntent::Reports),
    (&["patient"], VoiceIntent::Patients),
    (&["cart"], VoiceIntent::Cart),
];

/// Classify a transcript.
///
/// # Returns
/// `None` when no keyword matches.
#[must_use]
pub fn classify(text: &str) -> Option<VoiceIntent> {
    let text = text.to_lowercase();

    if text.contains("appointment") {
        return Some(if text.contains("book") {
            VoiceIntent::BookAppointment
        } else {
            VoiceIntent::Appointments
        });
    }

    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| text.contains(k)))
        .map(|(_, intent)| *intent)
}

/// Whether the transcript is phrased as a navigation command rather than
/// dictation.
#[must_use]
pub fn is_navigation_command(text: &str) -> bool {
    let text = text.to_lowercase();
    ["go to", "open", "show", "view"]
        .iter()
        .any(|k| text.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_basic_commands() {
        assert_eq!(classify("Go to appointments"), Some(VoiceIntent::Appointments));
        assert_eq!(classify("Book appointment"), Some(VoiceIntent::BookAppointment));
        assert_eq!(classify("Open reports"), Some(VoiceIntent::Reports));
        assert_eq!(classify("Show medicines"), Some(VoiceIntent::Pharmacy));
        assert_eq!(classify("View cart"), Some(VoiceIntent::Cart));
        assert_eq!(classify("What's the weather"), None);
    }

    #[test]
    fn test_precedence_is_fixed() {
        // appointment beats report
        assert_eq!(
            classify("show the report from my appointment"),
            Some(VoiceIntent::Appointments)
        );
        // notes beats patient
        assert_eq!(classify("open patient notes"), Some(VoiceIntent::Notes));
        // pharmacy beats cart
        assert_eq!(classify("medicine cart"), Some(VoiceIntent::Pharmacy));
        // report beats patient
        assert_eq!(classify("patient reports"), Some(VoiceIntent::Reports));
    }

    #[test]
    fn test_navigation_command_detection() {
        assert!(is_navigation_command("Go to home"));
        assert!(is_navigation_command("VIEW my profile"));
        assert!(!is_navigation_command("I have been experiencing chest pain"));
    }
}
