use super::types::MeetingStatus;

impl MeetingStatus {
    pub const ALL: [MeetingStatus; 4] = [
        MeetingStatus::Agendada,
        MeetingStatus::EmAndamento,
        MeetingStatus::Finalizada,
        MeetingStatus::Cancelada,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MeetingStatus::Agendada => "AGENDADA",
            MeetingStatus::EmAndamento => "EM_ANDAMENTO",
            MeetingStatus::Finalizada => "FINALIZADA",
            MeetingStatus::Cancelada => "CANCELADA",
            MeetingStatus::Unknown => "UNKNOWN",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MeetingStatus::Agendada => "Agendada",
            MeetingStatus::EmAndamento => "Em andamento",
            MeetingStatus::Finalizada => "Finalizada",
            MeetingStatus::Cancelada => "Cancelada",
            MeetingStatus::Unknown => "Desconhecido",
        }
    }

    /// Parse a wire value; anything outside the lifecycle is `Unknown`.
    pub fn parse(raw: &str) -> MeetingStatus {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(raw.trim()))
            .unwrap_or(MeetingStatus::Unknown)
    }

    /// Statuses reachable in one step.
    ///
    /// AGENDADA may start or be cancelled, EM_ANDAMENTO may finish.
    /// FINALIZADA and CANCELADA are terminal, and so is an unknown status.
    pub fn available_transitions(self) -> &'static [MeetingStatus] {
        match self {
            MeetingStatus::Agendada => &[MeetingStatus::EmAndamento, MeetingStatus::Cancelada],
            MeetingStatus::EmAndamento => &[MeetingStatus::Finalizada],
            MeetingStatus::Finalizada | MeetingStatus::Cancelada | MeetingStatus::Unknown => &[],
        }
    }

    pub fn can_transition_to(self, next: MeetingStatus) -> bool {
        self.available_transitions().contains(&next)
    }

    pub fn is_terminal(self) -> bool {
        self.available_transitions().is_empty()
    }
}
