//! Status to presentation-token mappings.
//!
//! These take the raw wire string so that a value the client has never heard
//! of still renders: every function falls through to a default token.

pub const DEFAULT_COLOR: &str = "gray";
pub const DEFAULT_ICON: &str = "help-circle";

pub fn meeting_status_color(status: &str) -> &'static str {
    match normalize(status).as_str() {
        "AGENDADA" => "blue",
        "EM_ANDAMENTO" => "yellow",
        "FINALIZADA" => "green",
        "CANCELADA" => "red",
        _ => DEFAULT_COLOR,
    }
}

pub fn meeting_status_icon(status: &str) -> &'static str {
    match normalize(status).as_str() {
        "AGENDADA" => "calendar",
        "EM_ANDAMENTO" => "play-circle",
        "FINALIZADA" => "check-circle",
        "CANCELADA" => "x-circle",
        _ => DEFAULT_ICON,
    }
}

pub fn room_status_color(status: &str) -> &'static str {
    match normalize(status).as_str() {
        "LIVRE" => "green",
        "OCUPADA" => "red",
        "RESERVADA" => "yellow",
        "MANUTENCAO" => "orange",
        _ => DEFAULT_COLOR,
    }
}

pub fn room_status_icon(status: &str) -> &'static str {
    match normalize(status).as_str() {
        "LIVRE" => "door-open",
        "OCUPADA" => "door-closed",
        "RESERVADA" => "bookmark",
        "MANUTENCAO" => "wrench",
        _ => DEFAULT_ICON,
    }
}

pub fn person_status_color(status: &str) -> &'static str {
    match normalize(status).as_str() {
        "ATIVO" => "green",
        "INATIVO" => "red",
        _ => DEFAULT_COLOR,
    }
}

pub fn task_status_color(status: &str) -> &'static str {
    match normalize(status).as_str() {
        "PRE_REUNIAO" => "blue",
        "POS_REUNIAO" => "purple",
        _ => DEFAULT_COLOR,
    }
}

pub fn task_priority_color(priority: &str) -> &'static str {
    match normalize(priority).as_str() {
        "ALTA" => "red",
        "MEDIA" => "yellow",
        "BAIXA" => "green",
        _ => DEFAULT_COLOR,
    }
}

fn normalize(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}
