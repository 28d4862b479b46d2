#![allow(dead_code)]

use std::sync::Arc;

use world_atlas::prelude::*;

pub fn wawel() -> Landmark {
    Landmark::new(
        "Wawel".to_string(),
        "Zamek".to_string(),
        "Zamek królewski w Krakowie".to_string(),
    )
}

pub fn brama() -> Landmark {
    Landmark::new(
        "Brama Brandenburska".to_string(),
        "Pomnik".to_string(),
        "Klasycystyczna brama w Berlinie".to_string(),
    )
}

pub fn poland(landmarks: Vec<Landmark>) -> Country {
    Country::new(
        "Polska".to_string(),
        "Warszawa".to_string(),
        "PL".to_string(),
        landmarks,
    )
}

pub fn germany(landmarks: Vec<Landmark>) -> Country {
    Country::new(
        "Niemcy".to_string(),
        "Berlin".to_string(),
        "DE".to_string(),
        landmarks,
    )
}

pub fn europe(countries: Vec<Country>) -> Continent {
    Continent::new(
        "Europa".to_string(),
        "EU".to_string(),
        "746400000".to_string(),
        "10180000".to_string(),
        countries,
    )
}

pub fn asia() -> Continent {
    Continent::new(
        "Azja".to_string(),
        "AS".to_string(),
        "4641000000".to_string(),
        "44579000".to_string(),
        vec![],
    )
}

/// EU (PL with Wawel, DE with Brama Brandenburska) plus an empty AS.
pub fn sample_dataset() -> Dataset {
    Dataset::new(vec![
        ContinentEntry {
            continent: europe(vec![poland(vec![wawel()]), germany(vec![brama()])]),
        },
        ContinentEntry { continent: asia() },
    ])
}

pub fn store_with(dataset: Dataset) -> Arc<DocumentStore<InMemoryRepository>> {
    Arc::new(DocumentStore::new(Arc::new(InMemoryRepository::new(
        dataset,
    ))))
}

pub fn continent_service(
    dataset: Dataset,
) -> (
    ContinentService<InMemoryRepository>,
    Arc<DocumentStore<InMemoryRepository>>,
) {
    let store = store_with(dataset);
    (ContinentService::new(Arc::clone(&store)), store)
}

pub fn country_service(
    dataset: Dataset,
) -> (
    CountryService<InMemoryRepository>,
    Arc<DocumentStore<InMemoryRepository>>,
) {
    let store = store_with(dataset);
    (CountryService::new(Arc::clone(&store)), store)
}

pub fn landmark_service(
    dataset: Dataset,
) -> (
    LandmarkService<InMemoryRepository>,
    Arc<DocumentStore<InMemoryRepository>>,
) {
    let store = store_with(dataset);
    (LandmarkService::new(Arc::clone(&store)), store)
}
