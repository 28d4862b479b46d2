//! The backing document: every continent with its nested descendants.

use serde::{Deserialize, Serialize};

use super::entities::{Continent, Country, Landmark};

/// One array element of the backing document.
///
/// The document nests each continent under a `continent` key, a layout kept
/// for fixture-file compatibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinentEntry {
    pub continent: Continent,
}

/// The whole catalog document, as loaded from and persisted to disk.
///
/// All lookups are linear scans; the dataset is small and single-node, so
/// no index is kept. First match wins, and codes are compared
/// case-sensitively; callers normalize to uppercase before lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    pub entries: Vec<ContinentEntry>,
}

impl Dataset {
    pub fn new(entries: Vec<ContinentEntry>) -> Self {
        Self { entries }
    }

    pub fn continents(&self) -> impl Iterator<Item = &Continent> {
        self.entries.iter().map(|entry| &entry.continent)
    }

    pub fn find_continent(&self, code: &str) -> Option<&Continent> {
        self.continents().find(|continent| continent.code == code)
    }

    pub fn find_continent_mut(&mut self, code: &str) -> Option<&mut Continent> {
        self.entries
            .iter_mut()
            .map(|entry| &mut entry.continent)
            .find(|continent| continent.code == code)
    }

    pub fn push_continent(&mut self, continent: Continent) {
        self.entries.push(ContinentEntry { continent });
    }

    /// Removes a continent and, by ownership, all of its descendants.
    pub fn remove_continent(&mut self, code: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.continent.code != code);
        self.entries.len() < before
    }

    /// All countries flattened across continents, in document order.
    pub fn countries(&self) -> impl Iterator<Item = &Country> {
        self.continents()
            .flat_map(|continent| continent.countries.iter())
    }

    /// Finds a country by code along with its owning continent.
    pub fn find_country(&self, code: &str) -> Option<(&Continent, &Country)> {
        self.continents().find_map(|continent| {
            continent
                .countries
                .iter()
                .find(|country| country.code == code)
                .map(|country| (continent, country))
        })
    }

    pub fn find_country_mut(&mut self, code: &str) -> Option<&mut Country> {
        self.entries
            .iter_mut()
            .flat_map(|entry| entry.continent.countries.iter_mut())
            .find(|country| country.code == code)
    }

    /// True when any continent owns a country with the given code.
    ///
    /// Country codes are globally unique, so this is the create-time
    /// conflict check.
    pub fn has_country_code(&self, code: &str) -> bool {
        self.countries().any(|country| country.code == code)
    }

    /// Removes a country and, by ownership, all of its landmarks.
    pub fn remove_country(&mut self, code: &str) -> bool {
        for entry in &mut self.entries {
            let countries = &mut entry.continent.countries;
            let before = countries.len();
            countries.retain(|country| country.code != code);
            if countries.len() < before {
                return true;
            }
        }
        false
    }

    /// All landmarks flattened across every country, in document order.
    pub fn landmarks(&self) -> impl Iterator<Item = &Landmark> {
        self.countries().flat_map(|country| country.landmarks.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        let wawel = Landmark::new(
            "Wawel".to_string(),
            "Zamek".to_string(),
            "Zamek królewski w Krakowie".to_string(),
        );
        let poland = Country::new(
            "Polska".to_string(),
            "Warszawa".to_string(),
            "PL".to_string(),
            vec![wawel],
        );
        let germany = Country::new(
            "Niemcy".to_string(),
            "Berlin".to_string(),
            "DE".to_string(),
            vec![],
        );
        let europe = Continent::new(
            "Europa".to_string(),
            "EU".to_string(),
            "746400000".to_string(),
            "10180000".to_string(),
            vec![poland, germany],
        );
        let asia = Continent::new(
            "Azja".to_string(),
            "AS".to_string(),
            "4641000000".to_string(),
            "44579000".to_string(),
            vec![],
        );

        Dataset::new(vec![
            ContinentEntry { continent: europe },
            ContinentEntry { continent: asia },
        ])
    }

    #[test]
    fn test_find_continent() {
        let dataset = sample();

        assert_eq!(dataset.find_continent("EU").unwrap().name, "Europa");
        assert!(dataset.find_continent("XX").is_none());
        // Lookups are case-sensitive on the normalized code.
        assert!(dataset.find_continent("eu").is_none());
    }

    #[test]
    fn test_find_country_resolves_owning_continent() {
        let dataset = sample();

        let (continent, country) = dataset.find_country("PL").unwrap();
        assert_eq!(continent.name, "Europa");
        assert_eq!(country.capital, "Warszawa");

        assert!(dataset.find_country("FR").is_none());
    }

    #[test]
    fn test_countries_flatten_in_document_order() {
        let dataset = sample();

        let codes: Vec<&str> = dataset.countries().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["PL", "DE"]);
    }

    #[test]
    fn test_landmarks_flatten_across_countries() {
        let dataset = sample();

        let names: Vec<&str> = dataset.landmarks().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Wawel"]);
    }

    #[test]
    fn test_remove_continent_cascades() {
        let mut dataset = sample();

        assert!(dataset.remove_continent("EU"));
        assert!(!dataset.remove_continent("EU"));
        assert!(dataset.find_country("PL").is_none());
        assert_eq!(dataset.landmarks().count(), 0);
    }

    #[test]
    fn test_remove_country_cascades_landmarks() {
        let mut dataset = sample();

        assert!(dataset.remove_country("PL"));
        assert!(!dataset.remove_country("PL"));
        assert!(dataset.find_continent("EU").is_some());
        assert_eq!(dataset.landmarks().count(), 0);
    }

    #[test]
    fn test_document_wire_shape() {
        let dataset = sample();

        let value = serde_json::to_value(&dataset).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["continent"]["code"], "EU");
        assert_eq!(value[0]["continent"]["countries"][0]["code"], "PL");

        let parsed: Dataset = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, dataset);
    }
}
