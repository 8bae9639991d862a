use super::_structs::RutaMetadata;

const MAX_RESULTS: usize = 20;

/// Normaliza una consulta de ruta: mayúsculas, sin prefijo "RUTA " y solo
/// alfanuméricos ("Ruta 42-A" y "42a" buscan lo mismo).
pub fn normalize_route_query(query: &str) -> String {
    let upper = query.trim().to_uppercase();
    let stripped = upper.strip_prefix("RUTA ").unwrap_or(&upper);
    stripped
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Heurística de intención: la consulta parece un número de ruta si tras
/// normalizar queda algo corto que empieza con dígito.
pub fn is_route_query(query: &str) -> bool {
    let normalized = normalize_route_query(query);
    !normalized.is_empty()
        && normalized.len() <= 6
        && normalized.chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// Catálogo de rutas en memoria para búsqueda local por código o nombre.
#[derive(Debug, Clone, Default)]
pub struct RouteCatalog {
    routes: Vec<RutaMetadata>,
}

impl RouteCatalog {
    pub fn new(routes: Vec<RutaMetadata>) -> Self {
        Self { routes }
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Búsqueda por subcadena normalizada sobre código y nombre. Deduplica
    /// por código (las variantes IDA/REGRESO comparten código) y conserva el
    /// orden del catálogo.
    pub fn search(&self, query: &str) -> Vec<&RutaMetadata> {
        let needle = normalize_route_query(query);
        if needle.is_empty() {
            return Vec::new();
        }
        let mut seen: Vec<&str> = Vec::new();
        let mut results = Vec::new();
        for ruta in &self.routes {
            if results.len() >= MAX_RESULTS {
                break;
            }
            if seen.contains(&ruta.codigo.as_str()) {
                continue;
            }
            let code = normalize_route_query(&ruta.codigo);
            let name = normalize_route_query(&ruta.nombre);
            if code.contains(&needle) || name.contains(&needle) {
                seen.push(&ruta.codigo);
                results.push(ruta);
            }
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(codigo: &str, nombre: &str, sentido: &str) -> RutaMetadata {
        RutaMetadata {
            codigo: codigo.to_string(),
            nombre: nombre.to_string(),
            sentido: sentido.to_string(),
            tipo: "POR AUTOBUS".to_string(),
            subtipo: "URBANO".to_string(),
            departamento: "SAN SALVADOR".to_string(),
            kilometros: 10.0,
        }
    }

    #[test]
    fn test_query_normalization() {
        assert_eq!(normalize_route_query("Ruta 42-A"), "42A");
        assert_eq!(normalize_route_query("  ruta 101  "), "101");
        assert_eq!(normalize_route_query("42a"), "42A");
        assert_eq!(normalize_route_query("!!"), "");
    }

    #[test]
    fn test_route_intent() {
        assert!(is_route_query("42"));
        assert!(is_route_query("Ruta 101-B"));
        assert!(!is_route_query("Metrocentro"));
        assert!(!is_route_query(""));
    }

    #[test]
    fn test_search_matches_code_and_name() {
        let catalog = RouteCatalog::new(vec![
            meta("42-A", "Ruta 42-A Soyapango", "IDA"),
            meta("101", "Ruta 101 Santa Tecla", "IDA"),
        ]);
        let by_code = catalog.search("42a");
        assert_eq!(by_code.len(), 1);
        assert_eq!(by_code[0].codigo, "42-A");
        let by_name = catalog.search("tecla");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].codigo, "101");
    }

    #[test]
    fn test_search_dedupes_directions() {
        let catalog = RouteCatalog::new(vec![
            meta("42", "Ruta 42", "IDA"),
            meta("42", "Ruta 42", "REGRESO"),
        ]);
        assert_eq!(catalog.search("42").len(), 1);
    }

    #[test]
    fn test_search_caps_results() {
        let routes = (0..30)
            .map(|i| meta(&format!("42-{}", i), "Ruta 42", "IDA"))
            .collect();
        let catalog = RouteCatalog::new(routes);
        assert_eq!(catalog.search("42").len(), 20);
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        let catalog = RouteCatalog::new(vec![meta("42", "Ruta 42", "IDA")]);
        assert!(catalog.search("   ").is_empty());
    }
}
