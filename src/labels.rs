//! User-facing Spanish texts and the wire-tag to label mapping.

pub const TITLE: &str = "Personajes";
pub const LARGE_TITLE: &str = "Personajes de Futurama";

pub const LOADING_CAPTION: &str = "Cargando personajes...";

pub const ERROR_HEADING: &str = "Error";
pub const LOAD_FAILED: &str = "No se pudieron cargar los personajes. Por favor, intenta de nuevo.";

pub const EMPTY_HEADING: &str = "No hay personajes disponibles";
pub const EMPTY_BODY: &str = "No se encontraron personajes en este momento.";

pub const GENDER_PREFIX: &str = "Género: ";
pub const STATUS_PREFIX: &str = "Estado: ";
pub const SPECIES_PREFIX: &str = "Especie: ";

pub const GENDER_MALE: &str = "Hombre";
pub const GENDER_FEMALE: &str = "Mujer";
pub const STATUS_LIVE: &str = "Vivo";
pub const STATUS_DEAD: &str = "Muerto";
pub const UNKNOWN: &str = "Desconocido";

/// Display label for a raw gender tag. Total over all inputs.
pub fn translate_gender(raw: &str) -> &'static str {
    match raw {
        "MALE" => GENDER_MALE,
        "FEMALE" => GENDER_FEMALE,
        _ => UNKNOWN,
    }
}

/// Display label for a raw status tag. Total over all inputs.
pub fn translate_status(raw: &str) -> &'static str {
    match raw {
        "LIVE" => STATUS_LIVE,
        "DEAD" => STATUS_DEAD,
        _ => UNKNOWN,
    }
}
