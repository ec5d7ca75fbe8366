//! Database repository for the service catalog.

use sqlx::{PgConnection, types::Json};
use tracing::instrument;

use crate::db::errors::Result;
use crate::db::models::services::{Service, ServiceCreateDBRequest, ServiceSummary};
use crate::types::{ServiceId, abbrev_uuid};

/// Repository for catalog operations.
pub struct Services<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Services<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// List the whole catalog, ordered by catalog number.
    #[instrument(skip(self), err)]
    pub async fn list(&mut self) -> Result<Vec<Service>> {
        let services = sqlx::query_as::<_, Service>(
            r#"
            SELECT id, service_id, title, img, price, description, facility
            FROM services
            ORDER BY service_id, id
            "#,
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(services)
    }

    /// Fetch the projected summary of one catalog entry.
    #[instrument(skip(self), fields(service_id = %abbrev_uuid(&id)), err)]
    pub async fn get_summary(&mut self, id: ServiceId) -> Result<Option<ServiceSummary>> {
        let summary = sqlx::query_as::<_, ServiceSummary>("SELECT id, service_id, title, img, price FROM services WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(summary)
    }

    #[instrument(skip(self, request), fields(title = %request.title), err)]
    pub async fn create(&mut self, request: &ServiceCreateDBRequest) -> Result<Service> {
        let service = sqlx::query_as::<_, Service>(
            r#"
            INSERT INTO services (service_id, title, img, price, description, facility)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, service_id, title, img, price, description, facility
            "#,
        )
        .bind(&request.service_id)
        .bind(&request.title)
        .bind(&request.img)
        .bind(&request.price)
        .bind(&request.description)
        .bind(Json(&request.facility))
        .fetch_one(&mut *self.db)
        .await?;

        Ok(service)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::services::Facility;
    use sqlx::PgPool;
    use uuid::Uuid;

    fn entry(service_id: &str, title: &str, facility: Vec<Facility>) -> ServiceCreateDBRequest {
        ServiceCreateDBRequest {
            service_id: service_id.to_string(),
            title: title.to_string(),
            img: format!("https://example.com/{service_id}.jpg"),
            price: "150.00".to_string(),
            description: String::new(),
            facility,
        }
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_and_list_services(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Services::new(&mut conn);

        let facility = vec![Facility {
            name: "Instant Car Services".to_string(),
            details: "Same day".to_string(),
        }];
        repo.create(&entry("02", "Engine Repair", vec![])).await.unwrap();
        let created = repo.create(&entry("01", "Full car Repair", facility.clone())).await.unwrap();
        assert_eq!(created.facility.0, facility);

        let services = repo.list().await.unwrap();
        assert_eq!(services.len(), 2);
        assert_eq!(services[0].service_id, "01");
        assert_eq!(services[0].facility.0, facility);
        assert_eq!(services[1].title, "Engine Repair");
        assert!(services[1].facility.0.is_empty());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_get_summary(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Services::new(&mut conn);

        let created = repo.create(&entry("03", "Wheel Alignment", vec![])).await.unwrap();
        let summary = repo.get_summary(created.id).await.unwrap().unwrap();
        assert_eq!(summary, ServiceSummary::from(created));

        assert!(repo.get_summary(Uuid::new_v4()).await.unwrap().is_none());
    }
}
