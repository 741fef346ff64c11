use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use csv::StringRecord;

use super::classify::classify_dependency;
use super::model::{Facility, FacilityDataset};
use crate::cache::MemoCache;

// ---------------------------------------------------------------------------
// Source schema
// ---------------------------------------------------------------------------

const COL_REGION: &str = "RegionGlosa";
const COL_COMMUNE: &str = "ComunaGlosa";
const COL_NAME: &str = "EstablecimientoGlosa";
const COL_KIND: &str = "TipoEstablecimientoGlosa";
const COL_DEPENDENCY: &str = "DependenciaAdministrativa";
const COL_CARE_LEVEL: &str = "NivelAtencionEstabglosa";
const COL_STREET_TYPE: &str = "TipoViaGlosa";
const COL_STREET_NAME: &str = "NombreVia";
const COL_STREET_NUMBER: &str = "Numero";
const COL_LATITUDE: &str = "Latitud";
const COL_LONGITUDE: &str = "Longitud";
const COL_PHONE: &str = "TelefonoMovil_TelefonoFijo";

/// Memo table for loaded datasets, keyed by `(path, region marker)`.
pub type DatasetCache = MemoCache<(PathBuf, String), FacilityDataset>;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load through `cache`: the file is read and parsed once per distinct
/// `(path, region_marker)` for the life of the process.
pub fn load_cached(
    cache: &DatasetCache,
    path: &Path,
    region_marker: &str,
) -> Result<Arc<FacilityDataset>> {
    let key = (path.to_path_buf(), region_marker.to_string());
    cache.get_or_try_insert_with(&key, || load_facilities(path, region_marker))
}

/// Load the semicolon-delimited facility file at `path`, keeping only rows
/// whose region contains `region_marker`.
///
/// Invalid UTF-8 is dropped, not fatal. Unparseable coordinates become
/// `None`. A missing file or a missing required column is an error.
pub fn load_facilities(path: &Path, region_marker: &str) -> Result<FacilityDataset> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("reading facility file {}", path.display()))?;
    let text = decode_dropping_invalid(&bytes);

    let dataset = parse_facilities(&text, region_marker)
        .with_context(|| format!("parsing facility file {}", path.display()))?;

    log::info!(
        "Loaded {} facilities matching region '{region_marker}' from {}",
        dataset.len(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Resolved positions of the columns we read.
struct Columns {
    region: usize,
    commune: usize,
    name: usize,
    kind: usize,
    dependency: usize,
    care_level: usize,
    street_type: usize,
    street_name: usize,
    street_number: usize,
    latitude: usize,
    longitude: usize,
    phone: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require = |name: &str| {
            find(name).with_context(|| format!("facility file missing '{name}' column"))
        };

        Ok(Columns {
            region: require(COL_REGION)?,
            commune: require(COL_COMMUNE)?,
            name: require(COL_NAME)?,
            kind: require(COL_KIND)?,
            dependency: require(COL_DEPENDENCY)?,
            care_level: require(COL_CARE_LEVEL)?,
            street_type: require(COL_STREET_TYPE)?,
            street_name: require(COL_STREET_NAME)?,
            street_number: require(COL_STREET_NUMBER)?,
            latitude: require(COL_LATITUDE)?,
            longitude: require(COL_LONGITUDE)?,
            phone: find(COL_PHONE),
        })
    }
}

fn parse_facilities(text: &str, region_marker: &str) -> Result<FacilityDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers().context("reading header row")?.clone();
    let cols = Columns::resolve(&headers)?;

    let mut facilities = Vec::new();
    let mut dropped = 0usize;
    let mut bad_coordinates = 0usize;

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("row {row_no}"))?;

        let Some(region) = cell(&record, cols.region) else {
            dropped += 1;
            continue;
        };
        if !region.contains(region_marker) {
            dropped += 1;
            continue;
        }

        let latitude = coerce_f64(record.get(cols.latitude));
        let longitude = coerce_f64(record.get(cols.longitude));
        if latitude.is_none() != cell(&record, cols.latitude).is_none()
            || longitude.is_none() != cell(&record, cols.longitude).is_none()
        {
            bad_coordinates += 1;
        }

        let dependency = cell(&record, cols.dependency);
        let sector = classify_dependency(dependency.as_deref());

        facilities.push(Facility {
            name: cell(&record, cols.name),
            commune: cell(&record, cols.commune),
            region,
            kind: cell(&record, cols.kind),
            dependency,
            care_level: cell(&record, cols.care_level),
            address: build_address(
                record.get(cols.street_type),
                record.get(cols.street_name),
                record.get(cols.street_number),
            ),
            latitude,
            longitude,
            phone: cols.phone.and_then(|i| cell(&record, i)),
            sector,
        });
    }

    log::debug!("{dropped} rows outside the target region dropped");
    if bad_coordinates > 0 {
        log::warn!("{bad_coordinates} rows had non-numeric coordinates; kept without a map position");
    }

    Ok(FacilityDataset::from_facilities(facilities, cols.phone.is_some()))
}

// -- Field helpers --

/// Drop invalid byte sequences (and a leading BOM) instead of failing.
fn decode_dropping_invalid(bytes: &[u8]) -> String {
    let text: String = bytes.utf8_chunks().map(|chunk| chunk.valid()).collect();
    match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    }
}

/// A non-empty cell as owned text; empty or absent cells are `None`.
fn cell(record: &StringRecord, idx: usize) -> Option<String> {
    record
        .get(idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Numeric coercion: anything that is not a finite number becomes `None`.
fn coerce_f64(raw: Option<&str>) -> Option<f64> {
    raw?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn build_address(street_type: Option<&str>, street_name: Option<&str>, number: Option<&str>) -> String {
    format!(
        "{} {} {}",
        street_type.unwrap_or(""),
        street_name.unwrap_or(""),
        number.unwrap_or("")
    )
    .trim()
    .to_string()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::model::Sector;

    const HEADER: &str = "RegionGlosa;ComunaGlosa;EstablecimientoGlosa;TipoEstablecimientoGlosa;\
DependenciaAdministrativa;NivelAtencionEstabglosa;TipoViaGlosa;NombreVia;Numero;Latitud;Longitud;\
TelefonoMovil_TelefonoFijo";

    fn write_fixture(body: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(body).expect("write fixture");
        file.flush().expect("flush fixture");
        file
    }

    fn fixture_text(rows: &[&str]) -> String {
        let mut text = HEADER.to_string();
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text.push('\n');
        text
    }

    #[test]
    fn keeps_only_target_region() {
        let text = fixture_text(&[
            "Metropolitana de Santiago;Maipú;CESFAM Maipú;CESFAM;Municipal;Primario;Avenida;Pajaritos;1234;-33.51;-70.75;",
            "Valparaíso;Viña del Mar;Hospital Gustavo Fricke;Hospital;Servicio de Salud Viña del Mar;Terciario;Calle;Álvarez;1532;-33.02;-71.54;",
            ";Santiago;Sin región;Clínica;Privado;Secundario;;;;;;",
        ]);
        let ds = parse_facilities(&text, "Metropolitana").expect("parse");

        assert_eq!(ds.len(), 1);
        let f = &ds.facilities[0];
        assert_eq!(f.name.as_deref(), Some("CESFAM Maipú"));
        assert_eq!(f.sector, Sector::Public);
        assert_eq!(f.address, "Avenida Pajaritos 1234");
        assert_eq!(f.coordinates(), Some((-70.75, -33.51)));
    }

    #[test]
    fn region_match_is_case_sensitive() {
        let text = fixture_text(&[
            "metropolitana;Maipú;A;CESFAM;Municipal;Primario;;;;;;",
        ]);
        let ds = parse_facilities(&text, "Metropolitana").expect("parse");
        assert_eq!(ds.len(), 0);
    }

    #[test]
    fn bad_coordinates_become_none() {
        let text = fixture_text(&[
            "Metropolitana de Santiago;Ñuñoa;Clínica X;Clínica;Privado;Secundario;Calle;Irarrázaval;;not-a-number;-70.6;+56 2 2222 2222",
        ]);
        let ds = parse_facilities(&text, "Metropolitana").expect("parse");

        assert_eq!(ds.len(), 1);
        let f = &ds.facilities[0];
        assert_eq!(f.latitude, None);
        assert_eq!(f.longitude, Some(-70.6));
        assert_eq!(f.coordinates(), None);
        assert_eq!(f.sector, Sector::Private);
        assert_eq!(f.phone.as_deref(), Some("+56 2 2222 2222"));
        assert_eq!(f.address, "Calle Irarrázaval");
    }

    #[test]
    fn address_keeps_inner_gap_but_is_trimmed() {
        assert_eq!(build_address(Some("Avenida"), None, Some("12")), "Avenida  12");
        assert_eq!(build_address(None, None, None), "");
        assert_eq!(build_address(None, Some("Matta"), None), "Matta");
    }

    #[test]
    fn missing_phone_column_is_tolerated() {
        let header = HEADER.trim_end_matches(";TelefonoMovil_TelefonoFijo");
        let text = format!(
            "{header}\nMetropolitana de Santiago;Maipú;A;CESFAM;Municipal;Primario;;;;;\n"
        );
        let ds = parse_facilities(&text, "Metropolitana").expect("parse");

        assert_eq!(ds.len(), 1);
        assert!(!ds.has_phone_column);
        assert_eq!(ds.facilities[0].phone, None);
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let err = parse_facilities("ComunaGlosa;Latitud\nMaipú;-33\n", "Metropolitana")
            .expect_err("region column is required");
        assert!(format!("{err:#}").contains("RegionGlosa"));
    }

    #[test]
    fn invalid_utf8_is_dropped() {
        let mut body = fixture_text(&[]).into_bytes();
        body.extend_from_slice(b"Metropolitana de Santiago;Pe\xffalol\xc3\xa9n;A;CESFAM;Municipal;Primario;;;;;;\n");
        let file = write_fixture(&body);

        let ds = load_facilities(file.path(), "Metropolitana").expect("load");
        assert_eq!(ds.facilities[0].commune.as_deref(), Some("Pealolén"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_facilities(Path::new("/definitely/not/here.csv"), "Metropolitana")
            .expect_err("missing file");
        assert!(format!("{err:#}").contains("reading facility file"));
    }

    #[test]
    fn cached_load_reads_file_once() {
        let text = fixture_text(&["Metropolitana de Santiago;Maipú;A;CESFAM;Municipal;Primario;;;;;;"]);
        let file = write_fixture(text.as_bytes());
        let cache = DatasetCache::new();

        let first = load_cached(&cache, file.path(), "Metropolitana").expect("first load");

        // Rewrite the file: a cached load must not notice.
        std::fs::write(file.path(), fixture_text(&[])).expect("rewrite");
        let second = load_cached(&cache, file.path(), "Metropolitana").expect("second load");

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 1);
        assert_eq!(cache.len(), 1);
    }
}
