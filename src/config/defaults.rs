//! Built-in rule tables for SECOP II public-works contracts.

use super::{
    CategoryRule, Config, FilterConfig, MacroGroup, SourceConfig, TextConfig, TypoRule,
    UnspscFamily,
};
use crate::models::FALLBACK_CATEGORY;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn rule(label: &str, keywords: &[&str]) -> CategoryRule {
    CategoryRule {
        label: label.to_string(),
        keywords: strings(keywords),
    }
}

fn group(label: &str, subcategories: &[&str]) -> MacroGroup {
    MacroGroup {
        label: label.to_string(),
        subcategories: strings(subcategories),
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            filter: FilterConfig::default(),
            text: TextConfig::default(),
            objects: default_objects(),
            subcategories: default_subcategories(),
            macros: default_macros(),
            source: SourceConfig::default(),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        let family = |code: &str, name: &str| UnspscFamily {
            code: code.to_string(),
            name: name.to_string(),
        };
        FilterConfig {
            statuses: strings(&["terminado", "modificado", "en ejecución", "cerrado"]),
            excluded_sectors: strings(&[
                "defensa",
                "Información Estadística",
                "Relaciones Exteriores",
                "Tecnologías de la Información y las Comunicaciones",
                "Minas y Energía",
                "Ley de Justicia",
                "Hacienda y Crédito Público",
                "Inteligencia Estratégica y Contrainteligencia",
            ]),
            require_unspsc_family: false,
            unspsc_families: vec![
                family("7210", "Mantenimiento y reparaciones"),
                family("7211", "Edificación residencial"),
                family("7212", "Edificación no residencial"),
                family("7214", "Infraestructura pesada"),
                family("7215", "Infraestructura especializada"),
            ],
        }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        let typo = |from: &str, to: &str| TypoRule {
            from: from.to_string(),
            to: to.to_string(),
        };
        TextConfig {
            stopwords: strings(&[
                "el", "la", "las", "los", "a", "de", "del", "para", "bs", "c", "e", "es", "sg",
                "srt", "mr", "d", "dt", "nsa", "s", "sa", "se", "lote", "rmtc", "rstc", "rtvc",
                "rvlc", "no", "spa", "oap", "sol", "nr", "ce", "srn", "srnc", "ranc", "ratc",
                "rcnc", "fun", "fortis", "amf", "amfis", "sm", "dtnsa", "realizar", "rrealizar",
                "realizacion", "ealizar", "actividades", "grupo", "servicio", "servicios",
                "ejecucion", "ejecutar", "esfuerzos", "prestar", "global", "segunda", "fase",
                "obra", "obras", "publica", "civil", "civiles", "complementarias", "mano",
                "necesarias", "mediante", "por", "sistema", "sin", "formula", "ajuste",
                "reajuste", "todo", "costo", "aunar", "anuar", "unar", "esfuerzo", "y",
                "precios", "precio", "unitario", "unitarios", "fijo", "fijos", "contratar",
                "bajo",
            ]),
            typos: vec![
                typo("manteniendo", "mantenimiento"),
                typo("manteniiento", "mantenimiento"),
                typo("matenimiento", "mantenimiento"),
                typo("construcion", "construccion"),
                typo("construicion", "construccion"),
                typo("construiccion", "construccion"),
            ],
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            base_url: "https://www.datos.gov.co/resource/jbjy-vk9h.json".to_string(),
            chunk_size: 5000,
            max_retries: 3,
            page_delay_ms: 1000,
            timeout_secs: 120,
            concurrent_years: 1,
            orden: "Nacional".to_string(),
            tipo_de_contrato: "Obra".to_string(),
            columns: strings(&[
                "nombre_entidad",
                "nit_entidad",
                "sector",
                "id_contrato",
                "estado_contrato",
                "modalidad_de_contratacion",
                "codigo_de_categoria_principal",
                "descripcion_del_proceso",
                "fecha_de_firma",
                "proveedor_adjudicado",
                "valor_del_contrato",
                "urlproceso",
            ]),
        }
    }
}

fn default_objects() -> Vec<CategoryRule> {
    vec![
        rule(
            "Adecuacion",
            &["adecuacion", "adecuar", "adecuaciones", "acondicionamiento", "habilitar"],
        ),
        rule(
            "Construccion",
            &[
                "construccion", "construir", "construcciones", "reconstruir", "reconstruccion",
                "demoler", "demolicion", "desmontaje", "desmonte", "desmontar", "instalacion",
            ],
        ),
        rule("Mantenimiento", &["mantenimiento", "mantener"]),
        rule(
            "Reparacion",
            &[
                "reparacion", "reparaciones", "reparar", "rehabilitar", "recuperacion",
                "rehabilitacion", "restauracion",
            ],
        ),
        rule("Atencion", &["atencion", "atender"]),
        rule(
            "Mejoramiento",
            &[
                "mejoramiento", "mejorar", "remodelar", "remodelacion", "ampliar", "ampliacion",
                "modernizacion",
            ],
        ),
    ]
}

fn default_subcategories() -> Vec<CategoryRule> {
    vec![
        rule(
            "Publico",
            &[
                "batallon", "batallones", "infanteria", "estacion de policia", "policia",
                "aerocivil", "insituto nacional de medicina legal", "oficinas", "base naval",
                "palacio de justucia", "juzgado", "superintendencia", "militar", "militares",
                "consejo", "inpec", "pabellon", "pabellones", "hospital", "centro de salud",
                "eps", "clinica", "salud", "naval", "navales", "guardacostas", "policial",
                "artilleria", "ejercito", "escuela naval", "policiales", "escuela de policia",
                "escuela militar",
            ],
        ),
        rule(
            "Rio",
            &[
                "rio", "cuenca", "cuenca hidrografica", "canal", "canal hidraulico", "afluente",
                "corriente hidrica", "control de inundaciones", "proteccion de rivera",
                "obras hidraulicas",
            ],
        ),
        rule(
            "Reservas y ecoparques",
            &[
                "reserva natural", "area protegida", "ecoparque", "restauracion ambiental",
                "reforestacion", "biodiversidad", "conservacion ambiental", "ecosistema",
                "gestion ambiental", "zona costera", "manejo ambiental", "ecologico", "sendero",
                "ecoturistico", "natural",
            ],
        ),
        rule(
            "Energia renovable",
            &[
                "energia renovable", "energia solar", "panel solar", "sistema fotovoltaico",
                "energia eolica", "generacion electrica limpia",
            ],
        ),
        rule(
            "Servicios publicos",
            &[
                "servicio publico", "servicios publicos", "domiciliario", "acueducto",
                "alcantarillado", "tratamiento de aguas", "agua potable", "residuos solidos",
                "aseo urbano", "disposicion final", "gas domiciliario",
            ],
        ),
        rule(
            "Agro",
            &[
                "agropecuario", "agricola", "ganaderia", "desarrollo rural", "sistema de riego",
                "distrito de riego", "asistencia tecnica rural",
            ],
        ),
        rule(
            "Turismo",
            &[
                "turismo", "infraestructura turistica", "atractivo turistico", "ecoturismo",
                "turismo cultural", "ruta turistica",
            ],
        ),
        rule(
            "Aeropuerto",
            &[
                "aeropuerto", "infraestructura aeroportuaria", "terminal aereo", "aviacion civil",
            ],
        ),
        rule(
            "Puente",
            &[
                "puente vehicular", "puente peatonal", "paso elevado", "interseccion vial",
                "rotonda vehicular", "puente",
            ],
        ),
        rule(
            "Puerto",
            &[
                "puerto", "infraestructura portuaria", "muelle", "embarcadero",
                "terminal fluvial", "navegacion fluvial",
            ],
        ),
        rule(
            "Transporte publico",
            &[
                "transporte publico", "movilidad urbana", "sistema de transporte masivo",
                "terminal de transporte", "bus", "metro", "cicloruta", "bicicarril",
            ],
        ),
        rule(
            "Tren",
            &["tren", "ferrocarril", "infraestructura ferroviaria", "red ferroviaria"],
        ),
        rule(
            "Vias",
            &[
                "vias", "via", "via nacional", "carretera", "red vial", "corredor vial",
                "pavimentacion", "mejoramiento vial", "glorieta", "interseccion vial",
            ],
        ),
        rule(
            "Vias terciarias",
            &[
                "via terciaria", "red vial terciaria", "camino rural",
                "mejoramiento de vias rurales",
            ],
        ),
        rule(
            "Parques y plazas",
            &[
                "parque urbano", "plaza publica", "espacio publico", "zona recreativa",
                "escenario recreativo", "plazoleta",
            ],
        ),
        rule(
            "Vias urbanas",
            &[
                "via urbana", "infraestructura urbana", "anden", "andenes", "malla vial urbana",
                "pavimentacion urbana",
            ],
        ),
        rule(
            "Vivienda",
            &[
                "vivienda", "proyecto habitacional", "mejoramiento de vivienda", "urbanizacion",
                "solucion de vivienda",
            ],
        ),
        rule(
            "Educacion",
            &[
                "educacion", "institucion educativa", "colegio", "escuela", "universidad",
                "infraestructura educativa", "aulas", "sede educativa",
            ],
        ),
        rule(
            "Deporte",
            &[
                "deporte", "escenario deportivo", "polideportivo", "coliseo", "cancha deportiva",
                "unidad deportiva",
            ],
        ),
    ]
}

fn default_macros() -> Vec<MacroGroup> {
    vec![
        group("Ambiental y gestion del territorio", &["Rio", "Reservas y ecoparques"]),
        group(
            "Productiva y de servicios",
            &["Energia renovable", "Servicios publicos", "Agro", "Turismo"],
        ),
        group(
            "Transporte",
            &[
                "Aeropuerto", "Puente", "Puerto", "Transporte publico", "Tren", "Vias",
                "Vias terciarias",
            ],
        ),
        group(
            "Urbanismo y desarrollo metropolitano",
            &["Parques y plazas", "Vias urbanas", "Vivienda", "Educacion", "Deporte"],
        ),
        group(FALLBACK_CATEGORY, &[FALLBACK_CATEGORY, "Publico"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::normalize::normalize_str;

    #[test]
    fn test_default_keywords_are_normalized() {
        let cfg = Config::default();
        for rule in cfg.objects.iter().chain(&cfg.subcategories) {
            for keyword in &rule.keywords {
                assert_eq!(&normalize_str(keyword), keyword, "in {}", rule.label);
            }
        }
        for word in &cfg.text.stopwords {
            assert_eq!(&normalize_str(word), word);
        }
    }
}
