//! Bundled example incidents for trying the service out

use crate::types::Language;

const SPANISH: [&str; 3] = [
    "Oficial respondió a llamada de disturbio doméstico en calle Principal 456. Víctima reporta empujones y gritos. Oficial no documentó lesiones visibles. Arrestado sin lectura de derechos. Testigo menciona arma de fuego pero no aparece en reporte.",
    "Robo en tienda de conveniencia, 23:45 horas. Empleado reporta pérdida de $150 en efectivo. Cámaras de seguridad no funcionaban 'desde hace una semana'. No se tomaron fotos de la escena. Oficial llegó 2 horas después de la llamada.",
    "Accidente vehicular con 2 autos, sin heridos reportados. Conductor A olía a alcohol según oficial, pero no se realizó prueba de alcoholemia. Policía escribió fecha incorrecta del incidente. Ambos vehículos abandonados en el lugar sin remolque solicitado.",
];

const ENGLISH: [&str; 3] = [
    "Officer responded to a domestic disturbance call at 456 Main Street. Victim reports pushing and shouting. Officer did not document visible injuries. Arrest made without reading rights. Witness mentions a firearm but it does not appear in the report.",
    "Convenience store robbery, 23:45. Employee reports a loss of $150 in cash. Security cameras had not been working 'for a week'. No photos of the scene were taken. Officer arrived 2 hours after the call.",
    "Two-car collision, no injuries reported. Driver A smelled of alcohol according to the officer, but no breathalyzer test was performed. Officer wrote the wrong incident date. Both vehicles left at the scene without requesting a tow.",
];

/// All bundled examples for a language
pub fn examples(language: Language) -> &'static [&'static str] {
    match language {
        Language::Spanish => &SPANISH,
        Language::English => &ENGLISH,
    }
}

/// Pick an example by an arbitrary seed (wraps around)
pub fn example(language: Language, seed: usize) -> &'static str {
    let all = examples(language);
    all[seed % all.len()]
}
