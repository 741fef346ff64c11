//! Writes `establecimientos_20251014.csv`: a synthetic, deterministic facility
//! file in the datos.gob.cl layout, for running the dashboard without the
//! real download.

use anyhow::{Context, Result};

const OUTPUT_PATH: &str = "establecimientos_20251014.csv";

const HEADER: [&str; 12] = [
    "RegionGlosa",
    "ComunaGlosa",
    "EstablecimientoGlosa",
    "TipoEstablecimientoGlosa",
    "DependenciaAdministrativa",
    "NivelAtencionEstabglosa",
    "TipoViaGlosa",
    "NombreVia",
    "Numero",
    "Latitud",
    "Longitud",
    "TelefonoMovil_TelefonoFijo",
];

/// (commune, centre latitude, centre longitude)
const RM_COMMUNES: [(&str, f64, f64); 8] = [
    ("Santiago", -33.4489, -70.6693),
    ("Maipú", -33.5110, -70.7580),
    ("Puente Alto", -33.6117, -70.5758),
    ("La Florida", -33.5227, -70.5984),
    ("Ñuñoa", -33.4569, -70.5977),
    ("Providencia", -33.4314, -70.6093),
    ("Pudahuel", -33.4400, -70.7470),
    ("Peñalolén", -33.4862, -70.5330),
];

const OTHER_REGIONS: [(&str, &str); 2] = [
    ("Región de Valparaíso", "Viña del Mar"),
    ("Región del Biobío", "Concepción"),
];

/// (facility type, name prefix, care level)
const KINDS: [(&str, &str, &str); 5] = [
    ("Centro de Salud Familiar (CESFAM)", "CESFAM", "Primario"),
    ("Servicio de Atención Primaria de Urgencia (SAPU)", "SAPU", "Primario"),
    ("Hospital", "Hospital", "Terciario"),
    ("Clínica", "Clínica", "Secundario"),
    ("Centro Médico y Dental", "Centro Médico", "Secundario"),
];

const DEPENDENCIES: [&str; 5] = [
    "Municipal",
    "Servicio de Salud Metropolitano Central",
    "Privado",
    "SEREMI de Salud",
    "Fuerzas Armadas",
];

const STREET_TYPES: [&str; 3] = ["Avenida", "Calle", "Pasaje"];
const STREET_NAMES: [&str; 6] = [
    "Libertador Bernardo O'Higgins",
    "Pajaritos",
    "Vicuña Mackenna",
    "Irarrázaval",
    "Concha y Toro",
    "Grecia",
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Uniform jitter in `[-spread, spread)`.
    fn jitter(&mut self, spread: f64) -> f64 {
        (self.next_f64() * 2.0 - 1.0) * spread
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(OUTPUT_PATH)
        .with_context(|| format!("creating {OUTPUT_PATH}"))?;
    writer.write_record(HEADER).context("writing header")?;

    let mut rows = 0usize;
    for (commune, lat, lon) in RM_COMMUNES {
        for n in 1..=12 {
            let (kind, prefix, level) = *rng.pick(&KINDS);
            let dependency = *rng.pick(&DEPENDENCIES);
            let street_type = *rng.pick(&STREET_TYPES);
            let street_name = *rng.pick(&STREET_NAMES);

            // Every so often leave the number blank or break a coordinate,
            // like the real export does.
            let number = if n % 5 == 0 {
                String::new()
            } else {
                (100 + rng.next_u64() % 9900).to_string()
            };
            let latitude = if n % 7 == 0 {
                "sin información".to_string()
            } else {
                format!("{:.6}", lat + rng.jitter(0.03))
            };
            let longitude = format!("{:.6}", lon + rng.jitter(0.03));
            let phone = if n % 3 == 0 {
                String::new()
            } else {
                format!("+56 2 2{:03} {:04}", rng.next_u64() % 1000, rng.next_u64() % 10000)
            };

            writer
                .write_record([
                    "Región Metropolitana de Santiago",
                    commune,
                    format!("{prefix} {commune} {n}").as_str(),
                    kind,
                    dependency,
                    level,
                    street_type,
                    street_name,
                    number.as_str(),
                    latitude.as_str(),
                    longitude.as_str(),
                    phone.as_str(),
                ])
                .context("writing facility row")?;
            rows += 1;
        }
    }

    // Rows the dashboard must drop.
    for (region, commune) in OTHER_REGIONS {
        writer
            .write_record([
                region,
                commune,
                format!("Hospital {commune}").as_str(),
                "Hospital",
                "Servicio de Salud",
                "Terciario",
                "Calle",
                "Principal",
                "1",
                "-33.0",
                "-71.5",
                "",
            ])
            .context("writing out-of-region row")?;
    }

    writer.flush().context("flushing output")?;
    println!(
        "Wrote {rows} Región Metropolitana facilities (+{} from other regions) to {OUTPUT_PATH}",
        OTHER_REGIONS.len()
    );
    Ok(())
}
