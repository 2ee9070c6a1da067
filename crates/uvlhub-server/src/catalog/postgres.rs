//! PostgreSQL catalog backend.
//!
//! Datasets are selected with a single dynamically built statement; their
//! authors, feature models and files are then loaded with one `= ANY($1)`
//! query each and stitched together in memory.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;
use uvlhub_common::types::{
    Author, Dataset, DatasetMetadata, FeatureModel, HubFile, PublicationType,
};

use super::{Catalog, CatalogError, CatalogQuery, CatalogStats, Predicate, SortOrder};

const SELECT_DATASETS: &str = r#"
    SELECT d.id, d.user_id, d.created_at,
           m.id AS meta_id, m.title, m.description, m.tags,
           m.publication_type, m.publication_doi, m.dataset_doi
    FROM data_sets d
    JOIN ds_meta_data m ON m.id = d.ds_meta_data_id
    WHERE TRUE"#;

#[derive(Debug, sqlx::FromRow)]
struct DatasetRow {
    id: Uuid,
    user_id: Uuid,
    created_at: DateTime<Utc>,
    meta_id: Uuid,
    title: String,
    description: String,
    tags: String,
    publication_type: String,
    publication_doi: Option<String>,
    dataset_doi: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct AuthorRow {
    ds_meta_data_id: Uuid,
    name: String,
    affiliation: Option<String>,
    orcid: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct FeatureModelRow {
    id: Uuid,
    data_set_id: Uuid,
}

#[derive(Debug, sqlx::FromRow)]
struct FileRow {
    id: Uuid,
    feature_model_id: Uuid,
    name: String,
    checksum: String,
    size: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct StatsRow {
    datasets: i64,
    feature_models: i64,
    files: i64,
    total_size_in_bytes: i64,
}

/// Catalog backed by the relational store.
#[derive(Debug, Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Insert datasets that are not yet in the catalog.
    ///
    /// Records whose id already exists are skipped. Returns the number of
    /// datasets inserted.
    pub async fn seed(&self, datasets: &[Dataset]) -> Result<usize, CatalogError> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for dataset in datasets {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM data_sets WHERE id = $1)")
                    .bind(dataset.id)
                    .fetch_one(&mut *tx)
                    .await?;
            if exists {
                tracing::debug!(dataset_id = %dataset.id, "Dataset already present, skipping");
                continue;
            }

            insert_dataset(&mut tx, dataset).await?;
            inserted += 1;
        }

        tx.commit().await?;
        tracing::info!(inserted, total = datasets.len(), "Seeded PostgreSQL catalog");
        Ok(inserted)
    }

    async fn load_authors(
        &self,
        meta_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<Author>>, CatalogError> {
        let rows: Vec<AuthorRow> = sqlx::query_as(
            r#"
            SELECT ds_meta_data_id, name, affiliation, orcid
            FROM authors
            WHERE ds_meta_data_id = ANY($1)
            ORDER BY ds_meta_data_id, position
            "#,
        )
        .bind(meta_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut authors: HashMap<Uuid, Vec<Author>> = HashMap::new();
        for row in rows {
            authors.entry(row.ds_meta_data_id).or_default().push(Author {
                name: row.name,
                affiliation: row.affiliation,
                orcid: row.orcid,
            });
        }
        Ok(authors)
    }

    async fn load_feature_models(
        &self,
        dataset_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<FeatureModel>>, CatalogError> {
        let models: Vec<FeatureModelRow> = sqlx::query_as(
            r#"
            SELECT id, data_set_id
            FROM feature_models
            WHERE data_set_id = ANY($1)
            ORDER BY data_set_id, position
            "#,
        )
        .bind(dataset_ids)
        .fetch_all(&self.pool)
        .await?;

        let files: Vec<FileRow> = sqlx::query_as(
            r#"
            SELECT f.id, f.feature_model_id, f.name, f.checksum, f.size
            FROM hubfiles f
            JOIN feature_models fm ON fm.id = f.feature_model_id
            WHERE fm.data_set_id = ANY($1)
            ORDER BY f.feature_model_id, f.position
            "#,
        )
        .bind(dataset_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut files_by_model: HashMap<Uuid, Vec<HubFile>> = HashMap::new();
        for row in files {
            files_by_model
                .entry(row.feature_model_id)
                .or_default()
                .push(HubFile {
                    id: row.id,
                    name: row.name,
                    checksum: row.checksum,
                    size: row.size,
                });
        }

        let mut by_dataset: HashMap<Uuid, Vec<FeatureModel>> = HashMap::new();
        for row in models {
            by_dataset.entry(row.data_set_id).or_default().push(FeatureModel {
                id: row.id,
                files: files_by_model.remove(&row.id).unwrap_or_default(),
            });
        }
        Ok(by_dataset)
    }
}

/// Publication types are stored by machine name (`DATA_MANAGEMENT_PLAN`).
fn decode_publication_type(id: Uuid, stored: &str) -> Result<PublicationType, CatalogError> {
    stored
        .parse()
        .map_err(|e| CatalogError::Decode(format!("dataset {id}: {e}")))
}

/// Escape `LIKE` metacharacters and wrap the needle for substring matching.
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn push_ilike(builder: &mut QueryBuilder<'static, Postgres>, column: &str, needle: &str) {
    builder.push(column);
    builder.push(" ILIKE ");
    builder.push_bind(like_pattern(needle));
    builder.push(" ESCAPE '\\'");
}

/// Build the dataset selection statement for a catalog query.
fn select_datasets(query: &CatalogQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(SELECT_DATASETS);

    for predicate in &query.predicates {
        builder.push(" AND ");
        match predicate {
            Predicate::PublicationTypeIs(kind) => {
                builder.push("m.publication_type = ");
                builder.push_bind(kind.name());
            }
            Predicate::TagsContain(needle) => push_ilike(&mut builder, "m.tags", needle),
            Predicate::TitleContains(needle) => push_ilike(&mut builder, "m.title", needle),
            Predicate::TitleOrTagsContain(needle) => {
                builder.push("(");
                push_ilike(&mut builder, "m.title", needle);
                builder.push(" OR ");
                push_ilike(&mut builder, "m.tags", needle);
                builder.push(")");
            }
            Predicate::AnyAuthorNameContains(needle) => {
                builder.push(
                    "EXISTS (SELECT 1 FROM authors a WHERE a.ds_meta_data_id = m.id AND ",
                );
                push_ilike(&mut builder, "a.name", needle);
                builder.push(")");
            }
        }
    }

    builder.push(match query.order {
        SortOrder::NewestFirst => " ORDER BY d.created_at DESC, d.id DESC",
        SortOrder::OldestFirst => " ORDER BY d.created_at ASC, d.id ASC",
    });
    builder
}

async fn insert_dataset(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    dataset: &Dataset,
) -> Result<(), CatalogError> {
    let metadata = &dataset.metadata;
    let meta_id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO ds_meta_data (
            id, title, description, tags, publication_type, publication_doi, dataset_doi
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(meta_id)
    .bind(&metadata.title)
    .bind(&metadata.description)
    .bind(&metadata.tags)
    .bind(metadata.publication_type.name())
    .bind(&metadata.publication_doi)
    .bind(&metadata.dataset_doi)
    .execute(&mut **tx)
    .await?;

    if !metadata.authors.is_empty() {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO authors (ds_meta_data_id, position, name, affiliation, orcid) ",
        );
        builder.push_values(metadata.authors.iter().enumerate(), |mut b, (pos, author)| {
            b.push_bind(meta_id)
                .push_bind(pos as i32)
                .push_bind(&author.name)
                .push_bind(&author.affiliation)
                .push_bind(&author.orcid);
        });
        builder.build().execute(&mut **tx).await?;
    }

    sqlx::query(
        r#"
        INSERT INTO data_sets (id, user_id, ds_meta_data_id, created_at)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(dataset.id)
    .bind(dataset.user_id)
    .bind(meta_id)
    .bind(dataset.created_at)
    .execute(&mut **tx)
    .await?;

    for (pos, model) in dataset.feature_models.iter().enumerate() {
        sqlx::query("INSERT INTO feature_models (id, data_set_id, position) VALUES ($1, $2, $3)")
            .bind(model.id)
            .bind(dataset.id)
            .bind(pos as i32)
            .execute(&mut **tx)
            .await?;

        if model.files.is_empty() {
            continue;
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO hubfiles (id, feature_model_id, position, name, checksum, size) ",
        );
        builder.push_values(model.files.iter().enumerate(), |mut b, (pos, file)| {
            b.push_bind(file.id)
                .push_bind(model.id)
                .push_bind(pos as i32)
                .push_bind(&file.name)
                .push_bind(&file.checksum)
                .push_bind(file.size);
        });
        builder.build().execute(&mut **tx).await?;
    }

    Ok(())
}

#[async_trait]
impl Catalog for PgCatalog {
    async fn fetch(&self, query: &CatalogQuery) -> Result<Vec<Dataset>, CatalogError> {
        let rows: Vec<DatasetRow> = select_datasets(query)
            .build_query_as()
            .fetch_all(&self.pool)
            .await?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let meta_ids: Vec<Uuid> = rows.iter().map(|r| r.meta_id).collect();
        let dataset_ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut authors = self.load_authors(&meta_ids).await?;
        let mut models = self.load_feature_models(&dataset_ids).await?;

        rows.into_iter()
            .map(|row| {
                let publication_type = decode_publication_type(row.id, &row.publication_type)?;

                Ok(Dataset {
                    id: row.id,
                    user_id: row.user_id,
                    created_at: row.created_at,
                    metadata: DatasetMetadata {
                        title: row.title,
                        description: row.description,
                        tags: row.tags,
                        publication_type,
                        publication_doi: row.publication_doi,
                        dataset_doi: row.dataset_doi,
                        authors: authors.remove(&row.meta_id).unwrap_or_default(),
                    },
                    feature_models: models.remove(&row.id).unwrap_or_default(),
                })
            })
            .collect()
    }

    async fn stats(&self) -> Result<CatalogStats, CatalogError> {
        let row: StatsRow = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM data_sets) AS datasets,
                (SELECT COUNT(*) FROM feature_models) AS feature_models,
                (SELECT COUNT(*) FROM hubfiles) AS files,
                (SELECT COALESCE(SUM(size), 0)::BIGINT FROM hubfiles) AS total_size_in_bytes
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(CatalogStats {
            datasets: row.datasets,
            feature_models: row.feature_models,
            files: row.files,
            total_size_in_bytes: row.total_size_in_bytes,
        })
    }

    async fn ping(&self) -> Result<(), CatalogError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("tag1"), "%tag1%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("c:\\x"), "%c:\\\\x%");
        assert_eq!(like_pattern(""), "%%");
    }

    #[test]
    fn test_unfiltered_query() {
        let builder = select_datasets(&CatalogQuery::new());
        let sql = builder.sql();
        assert!(sql.contains("WHERE TRUE ORDER BY d.created_at DESC, d.id DESC"));
        assert!(!sql.contains('$'));
    }

    #[test]
    fn test_oldest_first_order() {
        let builder = select_datasets(&CatalogQuery::new().order_by(SortOrder::OldestFirst));
        assert!(builder.sql().ends_with("ORDER BY d.created_at ASC, d.id ASC"));
    }

    #[test]
    fn test_predicates_bind_in_order() {
        let query = CatalogQuery::new()
            .filter(Predicate::PublicationTypeIs(PublicationType::Book))
            .filter(Predicate::TagsContain("tag1".into()))
            .filter(Predicate::TitleOrTagsContain("sample".into()));
        let builder = select_datasets(&query);
        let sql = builder.sql();

        assert!(sql.contains("AND m.publication_type = $1"));
        assert!(sql.contains("AND m.tags ILIKE $2 ESCAPE '\\'"));
        assert!(sql.contains("AND (m.title ILIKE $3 ESCAPE '\\' OR m.tags ILIKE $4 ESCAPE '\\')"));
    }

    #[test]
    fn test_decode_publication_type_reads_machine_names() {
        let id = Uuid::new_v4();
        assert_eq!(
            decode_publication_type(id, "DATA_MANAGEMENT_PLAN").unwrap(),
            PublicationType::DataManagementPlan
        );
        assert_eq!(decode_publication_type(id, "NONE").unwrap(), PublicationType::None);

        let err = decode_publication_type(id, "datamanagementplan").unwrap_err();
        assert!(matches!(err, CatalogError::Decode(_)));
        assert!(err.to_string().contains(&id.to_string()));
    }

    #[test]
    fn test_author_predicate_uses_exists() {
        let query = CatalogQuery::new().filter(Predicate::AnyAuthorNameContains("Thor".into()));
        let builder = select_datasets(&query);
        let sql = builder.sql();

        assert!(sql.contains(
            "AND EXISTS (SELECT 1 FROM authors a WHERE a.ds_meta_data_id = m.id AND a.name ILIKE $1 ESCAPE '\\')"
        ));
        assert!(!sql.contains("JOIN authors"));
    }
}
