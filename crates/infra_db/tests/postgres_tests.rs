//! PostgreSQL adapter tests
//!
//! These tests start a PostgreSQL container and are ignored by default.
//! Run them with `cargo test -p infra_db -- --ignored` where Docker is
//! available.

use std::sync::Arc;

use chrono::Duration;
use core_kernel::{AdapterHealth, Clock, HealthCheckable, PortError};
use domain_beneficiary::{
    Beneficiary, BeneficiaryChanges, BeneficiaryCriteria, BeneficiaryData, BeneficiaryRepository,
    CreateBeneficiary, RemoveBeneficiary,
};
use domain_document::{
    Document, DocumentCategory, DocumentCriteria, DocumentRepository, UpdateDocument, UpdateDocumentRequest,
};
use infra_db::{run_migrations, PostgresBeneficiaryRepository, PostgresDocumentRepository};
use test_utils::{assert_error_message, date, BeneficiaryFixtures, DocumentFixtures, FixedClock, TestDatabase};

async fn setup() -> (TestDatabase, Arc<FixedClock>) {
    let db = TestDatabase::new().await.expect("Failed to start test database");
    (db, Arc::new(FixedClock::default()))
}

fn beneficiaries(db: &TestDatabase, clock: &Arc<FixedClock>) -> Arc<PostgresBeneficiaryRepository> {
    Arc::new(PostgresBeneficiaryRepository::with_clock(db.pool().clone(), clock.clone()))
}

fn documents(db: &TestDatabase, clock: &Arc<FixedClock>) -> Arc<PostgresDocumentRepository> {
    Arc::new(PostgresDocumentRepository::with_clock(db.pool().clone(), clock.clone()))
}

mod beneficiary_repository_tests {
    use super::*;

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_save_find_and_upsert() {
        let (db, clock) = setup().await;
        let repository = beneficiaries(&db, &clock);

        let mut beneficiary = Beneficiary::create(BeneficiaryFixtures::john_doe(), clock.as_ref()).unwrap();
        let saved = repository.save(&beneficiary).await.unwrap();
        assert_eq!(saved, beneficiary);
        assert!(repository.exists(&beneficiary).await.unwrap());

        clock.advance(Duration::minutes(5));
        beneficiary
            .update(BeneficiaryChanges::name("John Doe Updated"), clock.as_ref())
            .unwrap();
        repository.save(&beneficiary).await.unwrap();

        let found = repository.find_by_id(beneficiary.id()).await.unwrap().unwrap();
        assert_eq!(found.name(), "John Doe Updated");
        assert_eq!(found.created_at(), saved.created_at());
        assert_eq!(found.updated_at(), clock.utc());
        assert_eq!(repository.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_find_criteria() {
        let (db, clock) = setup().await;
        let repository = beneficiaries(&db, &clock);
        for data in [
            BeneficiaryFixtures::john_doe(),
            BeneficiaryFixtures::jane_doe(),
            BeneficiaryData::new("Alice Johnson", "+55 11 91234-5678", date(1988, 3, 9)),
            BeneficiaryData::new("100% Real_Name", "11912345678", date(1970, 1, 1)),
        ] {
            repository
                .save(&Beneficiary::create(data, clock.as_ref()).unwrap())
                .await
                .unwrap();
        }

        let all = repository.find_all().await.unwrap();
        let names: Vec<_> = all.iter().map(|b| b.name()).collect();
        assert_eq!(names, vec!["100% Real_Name", "Alice Johnson", "Jane Doe", "John Doe"]);
        assert_eq!(repository.find(&BeneficiaryCriteria::default()).await.unwrap(), all);

        let johns = repository.find(&BeneficiaryCriteria::by_name("JOHN")).await.unwrap();
        let names: Vec<_> = johns.iter().map(|b| b.name()).collect();
        assert_eq!(names, vec!["Alice Johnson", "John Doe"]);

        let literal = repository.find(&BeneficiaryCriteria::by_name("0% r")).await.unwrap();
        assert_eq!(literal.len(), 1);
        let wildcard = repository.find(&BeneficiaryCriteria::by_name("l%n")).await.unwrap();
        assert!(wildcard.is_empty());

        let criteria = BeneficiaryCriteria {
            phone: Some("11987654321".to_string()),
            birth_date: Some(date(1995, 5, 25)),
            ..Default::default()
        };
        let jane = repository.find(&criteria).await.unwrap();
        assert_eq!(jane.len(), 1);
        assert_eq!(jane[0].name(), "Jane Doe");
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_order_matches_in_memory_adapter() {
        let (db, clock) = setup().await;
        let repository = beneficiaries(&db, &clock);
        let memory = domain_beneficiary::InMemoryBeneficiaryRepository::new();
        for (name, phone) in [("Bob", "11987654321"), ("adam", "11987654322"), ("Adam", "11987654323")] {
            let beneficiary =
                Beneficiary::create(BeneficiaryData::new(name, phone, date(1990, 1, 1)), clock.as_ref()).unwrap();
            repository.save(&beneficiary).await.unwrap();
            memory.save(&beneficiary).await.unwrap();
        }

        let stored = repository.find_all().await.unwrap();
        let names: Vec<_> = stored.iter().map(|b| b.name()).collect();
        assert_eq!(names, vec!["Adam", "adam", "Bob"]);
        assert_eq!(stored, memory.find_all().await.unwrap());
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_services_over_postgres() {
        let (db, clock) = setup().await;
        let repository = beneficiaries(&db, &clock);
        let create = CreateBeneficiary::new(repository.clone(), clock.clone());

        let created = create.handle(BeneficiaryFixtures::john_doe()).await.unwrap();
        assert_error_message(
            create.handle(BeneficiaryFixtures::john_doe()).await,
            "Beneficiary already exists.",
        );

        let remove = RemoveBeneficiary::new(repository.clone());
        remove.handle(created.id()).await.unwrap();
        assert_error_message(remove.handle(created.id()).await, "Beneficiary not found.");
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_corrupted_row_fails_loudly() {
        let (db, clock) = setup().await;
        let repository = beneficiaries(&db, &clock);
        let beneficiary = Beneficiary::create(BeneficiaryFixtures::jane_doe(), clock.as_ref()).unwrap();
        repository.save(&beneficiary).await.unwrap();

        sqlx::query("UPDATE beneficiaries SET phone = 'not a phone'")
            .execute(db.pool())
            .await
            .unwrap();

        let err = repository.find_by_id(beneficiary.id()).await.unwrap_err();
        assert!(matches!(err, PortError::Transformation { .. }));
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_health_check() {
        let (db, clock) = setup().await;
        let result = beneficiaries(&db, &clock).health_check().await;
        assert_eq!(result.status, AdapterHealth::Healthy);
    }
}

mod document_repository_tests {
    use super::*;

    /// Saves the fixtures one minute apart: identification, prescription, exam
    async fn seeded(db: &TestDatabase, clock: &Arc<FixedClock>) -> Arc<PostgresDocumentRepository> {
        let repository = documents(db, clock);
        for data in [
            DocumentFixtures::identification(),
            DocumentFixtures::prescription(),
            DocumentFixtures::exam(),
        ] {
            repository
                .save(&Document::create(data, clock.as_ref()).unwrap())
                .await
                .unwrap();
            clock.advance(Duration::minutes(1));
        }
        repository
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_stores_category_code() {
        let (db, clock) = setup().await;
        let repository = documents(&db, &clock);
        let document = Document::create(DocumentFixtures::identification(), clock.as_ref()).unwrap();
        repository.save(&document).await.unwrap();

        let stored: String = sqlx::query_scalar("SELECT document_type FROM documents WHERE id = $1")
            .bind(uuid::Uuid::from(document.id()))
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(stored, "DOCUMENTO_IDENTIFICACAO");
        assert!(repository.exists(&document).await.unwrap());
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_listing_and_criteria() {
        let (db, clock) = setup().await;
        let repository = seeded(&db, &clock).await;

        let all = repository.find_all().await.unwrap();
        let descriptions: Vec<_> = all.iter().map(|d| d.description()).collect();
        assert_eq!(
            descriptions,
            vec!["Blood test report", "Monthly prescription", "National identity card"]
        );
        assert_eq!(repository.find(&DocumentCriteria::default()).await.unwrap(), all);

        let prescriptions = repository
            .find(&DocumentCriteria::by_type(DocumentCategory::Prescriptions))
            .await
            .unwrap();
        assert_eq!(prescriptions.len(), 1);

        let cards = repository.find(&DocumentCriteria::by_description("CARD")).await.unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].document_type(), DocumentCategory::Identification);
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_update_and_missing_row() {
        let (db, clock) = setup().await;
        let repository = seeded(&db, &clock).await;
        let target = repository.find_all().await.unwrap().remove(0);

        let updated = UpdateDocument::new(repository.clone(), clock.clone())
            .handle(UpdateDocumentRequest::new(target.id(), "Full blood count"))
            .await
            .unwrap();
        assert_eq!(updated.description(), "Full blood count");
        assert_eq!(updated.updated_at(), clock.utc());

        repository.remove(&updated).await.unwrap();
        let err = repository.update(&updated).await.unwrap_err();
        assert!(err.is_not_found());
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_migrations_apply_over_existing_schema() {
    let (db, _clock) = setup().await;
    run_migrations(db.pool()).await.unwrap();
    run_migrations(db.pool()).await.unwrap();
}
