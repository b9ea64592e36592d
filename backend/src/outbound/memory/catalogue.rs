//! In-memory course catalogue with seeded or file-backed content.
//!
//! The catalogue starts from either the bundled demo set or an operator
//! registry file and then grows through [`CourseCatalogueCommand`]. Both
//! sources pass through the same validation, so an invalid registry never
//! reaches the query side.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::domain::ports::{CatalogueCommandError, CourseCatalogueCommand, CourseCatalogueQuery};
use crate::domain::{
    Category, CategoryDraft, Course, CourseDraft, Error, LocalizationMap,
    LocalizationValidationError,
};

const BUNDLED_CATALOGUE: &str = include_str!("../../../data/demo_catalogue.json");
const BUNDLED_ORIGIN: &str = "bundled demo data";

/// Errors raised while loading a course registry.
#[derive(Debug, thiserror::Error)]
pub enum CatalogueRegistryError {
    #[error("failed to read course registry {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse course registry from {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid course registry from {origin}: {message}")]
    Invalid { origin: String, message: String },
}

/// On-disk registry shape: drafts, validated during load.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
struct CatalogueRegistry {
    categories: Vec<CategoryDraft>,
    courses: Vec<CourseDraft>,
}

/// Seeded in-memory catalogue serving both catalogue ports.
#[derive(Debug)]
pub struct MemoryCatalogue {
    categories: Vec<Category>,
    courses: RwLock<Vec<Course>>,
}

impl MemoryCatalogue {
    /// Build the catalogue from the bundled demo set.
    pub fn seeded() -> Result<Self, CatalogueRegistryError> {
        let registry: CatalogueRegistry =
            serde_json::from_str(BUNDLED_CATALOGUE).map_err(|source| {
                CatalogueRegistryError::Parse {
                    origin: BUNDLED_ORIGIN.to_owned(),
                    source,
                }
            })?;
        Self::from_registry(registry, BUNDLED_ORIGIN)
    }

    /// Build the catalogue from an operator-provided JSON registry file.
    pub fn from_registry_file(path: &Path) -> Result<Self, CatalogueRegistryError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogueRegistryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let origin = path.display().to_string();
        let registry: CatalogueRegistry =
            serde_json::from_str(&raw).map_err(|source| CatalogueRegistryError::Parse {
                origin: origin.clone(),
                source,
            })?;
        Self::from_registry(registry, &origin)
    }

    fn from_registry(
        registry: CatalogueRegistry,
        origin: &str,
    ) -> Result<Self, CatalogueRegistryError> {
        let invalid = |message: String| CatalogueRegistryError::Invalid {
            origin: origin.to_owned(),
            message,
        };

        let mut categories: Vec<Category> = Vec::with_capacity(registry.categories.len());
        for draft in registry.categories {
            revalidate_localizations(&draft.localizations)
                .map_err(|err| invalid(format!("category {}: {err}", draft.slug)))?;
            let category = Category::new(draft).map_err(|err| invalid(err.to_string()))?;
            if categories.iter().any(|existing| existing.slug == category.slug) {
                return Err(invalid(format!("duplicate category slug: {}", category.slug)));
            }
            categories.push(category);
        }

        let mut courses: Vec<Course> = Vec::with_capacity(registry.courses.len());
        for draft in registry.courses {
            revalidate_localizations(&draft.localizations)
                .map_err(|err| invalid(format!("course {}: {err}", draft.slug)))?;
            let course = Course::new(draft).map_err(|err| invalid(err.to_string()))?;
            if courses.iter().any(|existing| existing.slug() == course.slug()) {
                return Err(invalid(format!("duplicate course slug: {}", course.slug())));
            }
            if !categories
                .iter()
                .any(|category| category.id == course.category_id())
            {
                return Err(invalid(format!(
                    "unknown course category: {} (course {})",
                    course.category_id(),
                    course.slug()
                )));
            }
            courses.push(course);
        }

        categories.sort_by(|a, b| a.slug.cmp(&b.slug));
        courses.sort_by(|a, b| a.slug().cmp(b.slug()));
        Ok(Self {
            categories,
            courses: RwLock::new(courses),
        })
    }

    /// Look up one course, bypassing the port for sibling adapters.
    pub(crate) async fn find_course(&self, slug: &str) -> Option<Course> {
        self.courses
            .read()
            .await
            .iter()
            .find(|course| course.slug() == slug)
            .cloned()
    }
}

/// Transparent deserialisation skips map validation; re-run it here.
fn revalidate_localizations(map: &LocalizationMap) -> Result<(), LocalizationValidationError> {
    LocalizationMap::new(map.as_map().clone()).map(|_| ())
}

#[async_trait]
impl CourseCatalogueQuery for MemoryCatalogue {
    async fn published_courses(&self) -> Result<Vec<Course>, Error> {
        Ok(self
            .courses
            .read()
            .await
            .iter()
            .filter(|course| course.published())
            .cloned()
            .collect())
    }

    async fn course_by_slug(&self, slug: &str) -> Result<Option<Course>, Error> {
        Ok(self.find_course(slug).await)
    }

    async fn all_courses(&self) -> Result<Vec<Course>, Error> {
        Ok(self.courses.read().await.clone())
    }

    async fn categories(&self) -> Result<Vec<Category>, Error> {
        Ok(self.categories.clone())
    }
}

#[async_trait]
impl CourseCatalogueCommand for MemoryCatalogue {
    async fn create_course(&self, draft: CourseDraft) -> Result<Course, CatalogueCommandError> {
        let course =
            Course::new(draft).map_err(|err| CatalogueCommandError::invalid(err.to_string()))?;
        if !self
            .categories
            .iter()
            .any(|category| category.id == course.category_id())
        {
            return Err(CatalogueCommandError::unknown_category(course.category_id()));
        }

        let mut courses = self.courses.write().await;
        if courses.iter().any(|existing| existing.slug() == course.slug()) {
            return Err(CatalogueCommandError::slug_taken(course.slug()));
        }
        // Collections stay ordered by slug, as the query port promises.
        let position = courses.partition_point(|existing| existing.slug() < course.slug());
        courses.insert(position, course.clone());
        Ok(course)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::collections::BTreeMap;

    use rstest::rstest;
    use serde_json::json;
    use uuid::Uuid;

    use super::*;
    use crate::domain::LocalizedCopy;

    fn seeded() -> MemoryCatalogue {
        MemoryCatalogue::seeded().expect("bundled demo data loads")
    }

    fn localizations(title: &str) -> LocalizationMap {
        let mut values = BTreeMap::new();
        values.insert("fr-DZ".to_owned(), LocalizedCopy::new(title, None));
        LocalizationMap::new(values).expect("valid localizations")
    }

    fn draft(slug: &str, category_id: Uuid, seats_total: u32) -> CourseDraft {
        CourseDraft {
            id: Uuid::new_v4(),
            slug: slug.to_owned(),
            category_id,
            localizations: localizations("Sécurité web"),
            price_centimes: 1_800_000,
            starts_on: "2026-11-02".parse().expect("valid date"),
            seats_total,
            contact_phone: "0550 11 22 33".to_owned(),
            published: true,
        }
    }

    async fn informatique_id(catalogue: &MemoryCatalogue) -> Uuid {
        catalogue
            .categories()
            .await
            .expect("categories")
            .iter()
            .find(|category| category.slug == "informatique")
            .expect("seeded category")
            .id
    }

    #[tokio::test]
    async fn seeded_published_courses_are_ordered_by_slug() {
        let catalogue = seeded();

        let published = catalogue.published_courses().await.expect("published");

        let slugs: Vec<&str> = published.iter().map(Course::slug).collect();
        assert_eq!(slugs, ["anglais-professionnel", "python-debutant"]);
    }

    #[tokio::test]
    async fn seeded_catalogue_keeps_drafts_out_of_the_published_list() {
        let catalogue = seeded();

        let all = catalogue.all_courses().await.expect("all courses");
        let draft = catalogue
            .course_by_slug("reseaux-avances")
            .await
            .expect("lookup")
            .expect("seeded draft");

        assert_eq!(all.len(), 3);
        assert!(!draft.published());
    }

    #[tokio::test]
    async fn seeded_categories_are_ordered_by_slug() {
        let catalogue = seeded();

        let categories = catalogue.categories().await.expect("categories");

        let slugs: Vec<&str> = categories
            .iter()
            .map(|category| category.slug.as_str())
            .collect();
        assert_eq!(slugs, ["informatique", "langues"]);
    }

    #[tokio::test]
    async fn created_courses_appear_in_slug_order() {
        let catalogue = seeded();
        let category_id = informatique_id(&catalogue).await;

        let course = catalogue
            .create_course(draft("securite-web", category_id, 12))
            .await
            .expect("course created");

        assert_eq!(course.slug(), "securite-web");
        let slugs: Vec<String> = catalogue
            .all_courses()
            .await
            .expect("all courses")
            .iter()
            .map(|course| course.slug().to_owned())
            .collect();
        assert_eq!(
            slugs,
            [
                "anglais-professionnel",
                "python-debutant",
                "reseaux-avances",
                "securite-web",
            ]
        );
    }

    #[tokio::test]
    async fn creating_a_taken_slug_is_rejected() {
        let catalogue = seeded();
        let category_id = informatique_id(&catalogue).await;

        let err = catalogue
            .create_course(draft("python-debutant", category_id, 12))
            .await
            .expect_err("duplicate slug must fail");

        assert_eq!(
            err,
            CatalogueCommandError::slug_taken("python-debutant")
        );
    }

    #[tokio::test]
    async fn creating_against_an_unknown_category_is_rejected() {
        let catalogue = seeded();
        let category_id = Uuid::new_v4();

        let err = catalogue
            .create_course(draft("securite-web", category_id, 12))
            .await
            .expect_err("unknown category must fail");

        assert_eq!(err, CatalogueCommandError::unknown_category(category_id));
    }

    #[tokio::test]
    async fn creating_an_invalid_draft_is_rejected() {
        let catalogue = seeded();
        let category_id = informatique_id(&catalogue).await;

        let err = catalogue
            .create_course(draft("securite-web", category_id, 0))
            .await
            .expect_err("zero seats must fail");

        assert!(matches!(err, CatalogueCommandError::Invalid { .. }));
        assert!(err.to_string().contains("course.seats_total"));
    }

    fn registry_json() -> serde_json::Value {
        json!({
            "categories": [{
                "id": "7f9e24c2-3b5a-4d8f-9c1e-2a6b8d4f0e13",
                "slug": "informatique",
                "localizations": { "fr-DZ": { "title": "Informatique" } }
            }],
            "courses": [{
                "id": "4e8a1f6b-2c9d-4a3e-8f57-1b6d9c2e4a80",
                "slug": "python-debutant",
                "categoryId": "7f9e24c2-3b5a-4d8f-9c1e-2a6b8d4f0e13",
                "localizations": { "fr-DZ": { "title": "Python débutant" } },
                "priceCentimes": 1_500_000,
                "startsOn": "2026-09-05",
                "seatsTotal": 24,
                "contactPhone": "0512345678",
                "published": true
            }]
        })
    }

    fn write_registry(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("courses.json");
        std::fs::write(&path, contents).expect("write registry file");
        path
    }

    #[rstest]
    fn registry_file_loads_and_validates() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_registry(&dir, &registry_json().to_string());

        let catalogue = MemoryCatalogue::from_registry_file(&path).expect("registry loads");

        assert_eq!(catalogue.categories.len(), 1);
    }

    #[rstest]
    fn missing_registry_file_reports_the_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("absent.json");

        let err = MemoryCatalogue::from_registry_file(&path).expect_err("missing file must fail");

        assert!(matches!(err, CatalogueRegistryError::Read { .. }));
        assert!(err.to_string().contains("absent.json"));
    }

    #[rstest]
    fn malformed_registry_json_is_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_registry(&dir, "{ not json");

        let err = MemoryCatalogue::from_registry_file(&path).expect_err("bad JSON must fail");

        assert!(matches!(err, CatalogueRegistryError::Parse { .. }));
    }

    #[rstest]
    fn registry_with_an_unknown_course_category_is_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut registry = registry_json();
        registry["courses"][0]["categoryId"] = json!("b3d15a7c-8e2f-4b61-a9d4-6c0f3e8b2a57");
        let path = write_registry(&dir, &registry.to_string());

        let err = MemoryCatalogue::from_registry_file(&path).expect_err("bad reference must fail");

        assert!(matches!(err, CatalogueRegistryError::Invalid { .. }));
        assert!(err.to_string().contains("unknown course category"));
    }

    #[rstest]
    fn registry_with_empty_localizations_is_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut registry = registry_json();
        registry["courses"][0]["localizations"] = json!({});
        let path = write_registry(&dir, &registry.to_string());

        let err =
            MemoryCatalogue::from_registry_file(&path).expect_err("empty localizations must fail");

        assert!(matches!(err, CatalogueRegistryError::Invalid { .. }));
    }
}
