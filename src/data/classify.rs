use super::model::Sector;

/// Marker for privately run facilities. Checked first: it wins over the
/// public markers when both appear.
const PRIVATE_MARKER: &str = "privad";

/// Municipal health, the regional health services and the regional
/// health secretariat (SEREMI).
const PUBLIC_MARKERS: [&str; 3] = ["municipal", "servicio de salud", "seremi"];

/// Classify an administrative-dependency label into a [`Sector`].
///
/// Total and case-insensitive; a missing label is `Other`.
pub fn classify_dependency(dependency: Option<&str>) -> Sector {
    let Some(label) = dependency else {
        return Sector::Other;
    };
    let label = label.to_lowercase();

    if label.contains(PRIVATE_MARKER) {
        Sector::Private
    } else if PUBLIC_MARKERS.iter().any(|m| label.contains(m)) {
        Sector::Public
    } else {
        Sector::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_public_dependencies() {
        for label in [
            "Municipal",
            "Servicio de Salud Metropolitano Sur Oriente",
            "SEREMI de Salud",
            "Departamento de Salud MUNICIPAL",
        ] {
            assert_eq!(classify_dependency(Some(label)), Sector::Public, "{label}");
        }
    }

    #[test]
    fn recognises_private_dependencies() {
        assert_eq!(classify_dependency(Some("Privado")), Sector::Private);
        assert_eq!(classify_dependency(Some("Entidad PRIVADA")), Sector::Private);
    }

    #[test]
    fn private_wins_over_public() {
        assert_eq!(
            classify_dependency(Some("Municipal en convenio privado")),
            Sector::Private
        );
    }

    #[test]
    fn anything_else_is_other() {
        assert_eq!(classify_dependency(None), Sector::Other);
        assert_eq!(classify_dependency(Some("")), Sector::Other);
        assert_eq!(classify_dependency(Some("Fuerzas Armadas")), Sector::Other);
    }
}
