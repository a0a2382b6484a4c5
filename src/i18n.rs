// src/i18n.rs
// DOCUMENTATION: Static string table for user-facing messages
// PURPOSE: Localize CLI output into English, Spanish and Czech

use crate::models::Language;

/// (key, [en, es, cs])
const STRINGS: &[(&str, [&str; 3])] = &[
    ("plannedTrips", ["Planned trips", "Viajes planificados", "Naplánované výlety"]),
    ("tripSaved", ["Trip saved", "Viaje guardado", "Výlet uložen"]),
    ("tripDeleted", ["Trip deleted", "Viaje eliminado", "Výlet smazán"]),
    ("tripNotFound", ["Trip not found", "Viaje no encontrado", "Výlet nenalezen"]),
    ("noTrips", ["No trips yet", "Todavía no hay viajes", "Zatím žádné výlety"]),
    (
        "confirmDeleteTitle",
        ["Delete trip?", "¿Eliminar el viaje?", "Smazat výlet?"],
    ),
    (
        "confirmDeleteContent",
        [
            "This action cannot be undone.",
            "Esta acción no se puede deshacer.",
            "Tuto akci nelze vrátit.",
        ],
    ),
    ("city", ["City", "Ciudad", "Město"]),
    ("days", ["Days", "Días", "Dny"]),
    ("description", ["Description", "Descripción", "Popis"]),
    (
        "nearbyPlaces",
        ["Interesting places nearby", "Lugares interesantes cerca", "Zajímavá místa v okolí"],
    ),
    ("noPlaces", ["No places found.", "No se encontraron lugares.", "Žádná místa nenalezena."]),
    ("loading", ["Loading...", "Cargando...", "Načítání..."]),
    ("loadedAt", ["Last updated", "Última actualización", "Naposledy aktualizováno"]),
    (
        "loadFailed",
        [
            "Places could not be loaded",
            "No se pudieron cargar los lugares",
            "Místa se nepodařilo načíst",
        ],
    ),
    ("placesToVisit", ["Places to visit", "Lugares para visitar", "Místa k návštěvě"]),
    ("placesSaved", ["Places saved", "Lugares guardados", "Místa uložena"]),
    ("selectionUnsaved", ["Selection not saved", "Selección no guardada", "Výběr neuložen"]),
    ("exportSaved", ["PDF saved to", "PDF guardado en", "PDF uloženo do"]),
    ("exportFailed", ["PDF export failed", "Error al exportar el PDF", "Export PDF selhal"]),
    ("saving", ["Saving...", "Guardando...", "Ukládání..."]),
    (
        "exportInProgress",
        ["Export already in progress", "Exportación en curso", "Export již probíhá"],
    ),
    ("colorMode", ["Color mode", "Modo de color", "Barevný režim"]),
    ("error", ["Error", "Error", "Chyba"]),
];

fn column(lang: Language) -> usize {
    match lang {
        Language::En => 0,
        Language::Es => 1,
        Language::Cs => 2,
    }
}

/// Look up a message
/// DOCUMENTATION: Falls back to English when a translation is blank, and to
/// the key itself when the key is unknown
pub fn t<'a>(lang: Language, key: &'a str) -> &'a str {
    match STRINGS.iter().find(|(k, _)| *k == key) {
        Some((_, values)) => {
            let localized = values[column(lang)];
            if localized.is_empty() {
                values[0]
            } else {
                localized
            }
        }
        None => key,
    }
}
