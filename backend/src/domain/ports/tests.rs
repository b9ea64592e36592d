use std::collections::BTreeMap;
use std::sync::Mutex;

use actix_rt::System;
use async_trait::async_trait;
use rstest::{fixture, rstest};
use uuid::Uuid;

use super::*;
use crate::domain::localization::{LocalizationMap, LocalizedCopy};
use crate::domain::{Course, CourseDraft, Error};

fn course(slug: &str, published: bool) -> Course {
    let mut values = BTreeMap::new();
    values.insert(
        "fr-DZ".to_owned(),
        LocalizedCopy::new("Python débutant", None),
    );
    Course::new(CourseDraft {
        id: Uuid::new_v4(),
        slug: slug.to_owned(),
        category_id: Uuid::new_v4(),
        localizations: LocalizationMap::new(values).expect("valid localizations"),
        price_centimes: 1_500_000,
        starts_on: chrono::NaiveDate::from_ymd_opt(2026, 9, 5).expect("valid date"),
        seats_total: 24,
        contact_phone: "0512345678".to_owned(),
        published,
    })
    .expect("valid course")
}

#[derive(Default)]
struct InMemoryCatalogue {
    courses: Mutex<Vec<Course>>,
}

#[async_trait]
impl CourseCatalogueQuery for InMemoryCatalogue {
    async fn published_courses(&self) -> Result<Vec<Course>, Error> {
        let guard = self.courses.lock().expect("catalogue poisoned");
        Ok(guard
            .iter()
            .filter(|course| course.published())
            .cloned()
            .collect())
    }

    async fn course_by_slug(&self, slug: &str) -> Result<Option<Course>, Error> {
        let guard = self.courses.lock().expect("catalogue poisoned");
        Ok(guard.iter().find(|course| course.slug() == slug).cloned())
    }

    async fn all_courses(&self) -> Result<Vec<Course>, Error> {
        let guard = self.courses.lock().expect("catalogue poisoned");
        Ok(guard.clone())
    }

    async fn categories(&self) -> Result<Vec<crate::domain::Category>, Error> {
        Ok(Vec::new())
    }
}

#[fixture]
fn catalogue() -> InMemoryCatalogue {
    let catalogue = InMemoryCatalogue::default();
    {
        let mut guard = catalogue.courses.lock().expect("catalogue poisoned");
        guard.push(course("python-debutant", true));
        guard.push(course("reseaux-avances", false));
    }
    catalogue
}

#[rstest]
fn published_listing_excludes_drafts(catalogue: InMemoryCatalogue) {
    System::new().block_on(async move {
        let published = catalogue.published_courses().await.expect("published list");
        assert_eq!(published.len(), 1);
        assert_eq!(published.first().map(Course::slug), Some("python-debutant"));
    });
}

#[rstest]
fn slug_lookup_returns_unpublished_drafts(catalogue: InMemoryCatalogue) {
    System::new().block_on(async move {
        let draft = catalogue
            .course_by_slug("reseaux-avances")
            .await
            .expect("lookup");
        assert!(draft.is_some_and(|course| !course.published()));

        let missing = catalogue.course_by_slug("absent").await.expect("lookup");
        assert!(missing.is_none());
    });
}
