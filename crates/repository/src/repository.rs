//! Generic repository
//!
//! A repository binds one model to one session. Reads turn a filter list into
//! a statement through its [`BuildSql`] strategy, execute it, and hand the
//! rows to its [`Resolver`]. The unit-of-work operations stage entities on
//! the session and leave flushing to it.

use std::marker::PhantomData;

use serde::Serialize;

use crate::build::{BuildSql, DefaultBuildSql};
use crate::config::RepositoryConfig;
use crate::error::ModelResult;
use crate::filters::{Filter, SearchFilter};
use crate::model::{Model, ModelDescriptor};
use crate::paginate::{DefaultPaginate, Paginate};
use crate::query::Statement;
use crate::results::{DefaultResolver, Fetched, ResolvedRow, Resolver};
use crate::session::value::{DatabaseRow, Row};
use crate::session::{Session, StagedRecord};

/// Per-call overrides for a read. Nothing set here outlives the call.
pub struct QueryOptions<'a, M> {
    /// Decode rows into `M` (`true`) or return them as column mappings
    pub scalars: bool,
    pub builder: Option<&'a dyn BuildSql>,
    pub resolver: Option<&'a dyn Resolver<M>>,
    pub paginate: Option<&'a dyn Paginate>,
}

impl<'a, M> QueryOptions<'a, M> {
    pub fn new() -> Self {
        Self {
            scalars: true,
            builder: None,
            resolver: None,
            paginate: None,
        }
    }

    /// Return tuple rows instead of entities
    pub fn rows() -> Self {
        Self {
            scalars: false,
            ..Self::new()
        }
    }

    pub fn scalars(mut self, scalars: bool) -> Self {
        self.scalars = scalars;
        self
    }

    pub fn with_builder(mut self, builder: &'a dyn BuildSql) -> Self {
        self.builder = Some(builder);
        self
    }

    pub fn with_resolver(mut self, resolver: &'a dyn Resolver<M>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn with_paginate(mut self, paginate: &'a dyn Paginate) -> Self {
        self.paginate = Some(paginate);
        self
    }
}

impl<'a, M> Default for QueryOptions<'a, M> {
    fn default() -> Self {
        Self::new()
    }
}

/// One page of results plus the paginator's verdict
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<M> {
    pub items: Vec<ResolvedRow<M>>,
    /// Paginator output: page count for [`DefaultPaginate`], row count for
    /// `LoadPaginate`
    pub total: i64,
    /// Rows matching the filters, ignoring the row window
    pub count: i64,
}

impl<M> Paginated<M> {
    pub fn into_parts(self) -> (Vec<ResolvedRow<M>>, i64) {
        (self.items, self.total)
    }
}

/// Filtered reads and unit-of-work staging for one model
pub struct Repository<M: Model, S: Session> {
    session: S,
    model: ModelDescriptor,
    builder: Box<dyn BuildSql>,
    resolver: Box<dyn Resolver<M>>,
    paginate: Box<dyn Paginate>,
    config: RepositoryConfig,
    _model: PhantomData<fn() -> M>,
}

impl<M: Model + 'static, S: Session> Repository<M, S> {
    /// Create a repository with the default strategies and configuration
    pub fn new(session: S) -> ModelResult<Self> {
        Self::with_config(session, RepositoryConfig::default())
    }

    pub fn with_config(session: S, config: RepositoryConfig) -> ModelResult<Self> {
        let model = M::descriptor();
        model.validate(&repository_name::<M>())?;

        Ok(Self {
            session,
            model,
            builder: Box::new(DefaultBuildSql::new(model)),
            resolver: Box::new(DefaultResolver),
            paginate: Box::new(DefaultPaginate),
            config,
            _model: PhantomData,
        })
    }

    pub fn model(&self) -> &ModelDescriptor {
        &self.model
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut S {
        &mut self.session
    }

    pub fn into_session(self) -> S {
        self.session
    }

    /// Replace the default statement builder for all later reads
    pub fn set_builder(&mut self, builder: impl BuildSql + 'static) {
        self.builder = Box::new(builder);
    }

    /// Replace the default result resolver for all later reads
    pub fn set_resolver(&mut self, resolver: impl Resolver<M> + 'static) {
        self.resolver = Box::new(resolver);
    }

    /// Replace the default paginator for all later paginated reads
    pub fn set_paginate(&mut self, paginate: impl Paginate + 'static) {
        self.paginate = Box::new(paginate);
    }

    /// Search filter honouring the configured case sensitivity
    pub fn search(&self, field_name: &str, value: Option<&str>) -> SearchFilter {
        SearchFilter::new(field_name, value).ignore_case(self.config.search_ignore_case)
    }

    /// Statement the repository would execute for `filters`
    pub fn statement(&self, filters: &[Filter], options: &QueryOptions<'_, M>) -> ModelResult<Statement> {
        options.builder.unwrap_or(&*self.builder).build(filters)
    }

    /// Every row matching `filters`
    pub async fn get_list(
        &mut self,
        filters: &[Filter],
        options: QueryOptions<'_, M>,
    ) -> ModelResult<Vec<ResolvedRow<M>>> {
        let statement = self.statement(filters, &options)?;
        let items = self.fetch_all(&statement, options.scalars).await?;

        Ok(options
            .resolver
            .unwrap_or(&*self.resolver)
            .process_items(items))
    }

    /// Rows matching `filters` plus the paginator's total over all matches
    pub async fn get_list_with_paginate(
        &mut self,
        filters: &[Filter],
        options: QueryOptions<'_, M>,
    ) -> ModelResult<Paginated<M>> {
        let statement = self.statement(filters, &options)?;
        let items = self.fetch_all(&statement, options.scalars).await?;
        let count = self.count(statement).await?;
        let limit = self.page_size(filters);

        let total = options
            .paginate
            .unwrap_or(&*self.paginate)
            .paginate(count, limit);

        Ok(Paginated {
            items: options
                .resolver
                .unwrap_or(&*self.resolver)
                .process_items(items),
            total,
            count,
        })
    }

    /// First row matching `filters`
    pub async fn get_one(
        &mut self,
        filters: &[Filter],
        options: QueryOptions<'_, M>,
    ) -> ModelResult<Option<ResolvedRow<M>>> {
        let statement = self.statement(filters, &options)?;
        let (sql, params) = statement.to_sql_with_params();
        self.log_statement(&sql);

        let item = match self.session.fetch_optional(&sql, &params).await? {
            Some(row) => Some(fetched(row.as_ref(), options.scalars)?),
            None => None,
        };

        Ok(options.resolver.unwrap_or(&*self.resolver).process_item(item))
    }

    /// Stage an entity for insertion
    pub fn add(&mut self, entity: &M) {
        let record = StagedRecord::from_model(entity);
        tracing::debug!(
            target: "elif_repository",
            "Staging insert into {} (key: {:?})",
            record.table,
            record.primary_key
        );
        self.session.add(record);
    }

    /// Stage several entities for insertion
    pub fn add_all(&mut self, entities: &[M]) {
        let records: Vec<_> = entities.iter().map(StagedRecord::from_model).collect();
        tracing::debug!(
            target: "elif_repository",
            "Staging {} inserts into {}",
            records.len(),
            self.model.table_name
        );
        self.session.add_all(records);
    }

    /// Stage an entity for deletion
    pub fn delete(&mut self, entity: &M) {
        let record = StagedRecord::from_model(entity);
        tracing::debug!(
            target: "elif_repository",
            "Staging delete from {} (key: {:?})",
            record.table,
            record.primary_key
        );
        self.session.delete(record);
    }

    async fn fetch_all(&mut self, statement: &Statement, scalars: bool) -> ModelResult<Vec<Fetched<M>>> {
        let (sql, params) = statement.to_sql_with_params();
        self.log_statement(&sql);

        self.session
            .fetch_all(&sql, &params)
            .await?
            .iter()
            .map(|row| fetched(row.as_ref(), scalars))
            .collect()
    }

    async fn count(&mut self, statement: Statement) -> ModelResult<i64> {
        let count_statement = statement.into_count(&self.model.primary_key());
        let (sql, params) = count_statement.to_sql_with_params();
        tracing::debug!(target: "elif_repository", "Counting: {}", sql);

        let count = match self.session.fetch_optional(&sql, &params).await? {
            Some(row) if row.column_count() > 0 => row.get_by_index(0)?.as_i64(),
            _ => None,
        };
        Ok(count.unwrap_or(0))
    }

    /// Limit of the last `LimitOffset` filter, else the configured default
    fn page_size(&self, filters: &[Filter]) -> i64 {
        let windows: Vec<_> = filters.iter().filter_map(Filter::as_limit_offset).collect();
        if windows.len() > 1 {
            tracing::warn!(
                target: "elif_repository",
                "{} LimitOffset filters given for {}; the last one wins",
                windows.len(),
                self.model.table_name
            );
        }

        windows
            .last()
            .map(|window| window.limit)
            .unwrap_or(self.config.default_page_size)
    }

    fn log_statement(&self, sql: &str) {
        if self.config.log_statements {
            tracing::debug!(target: "elif_repository", "Executing: {}", sql);
        }
    }
}

/// `Repository<Name>`, with the model's path stripped
fn repository_name<M>() -> String {
    let model = std::any::type_name::<M>();
    let short = model.rsplit("::").next().unwrap_or(model);
    format!("Repository<{}>", short)
}

fn fetched<M: Model>(row: &dyn DatabaseRow, scalars: bool) -> ModelResult<Fetched<M>> {
    if scalars {
        Ok(Fetched::Entity(M::from_row(row)?))
    } else {
        Ok(Fetched::Tuple(Row::from_database_row(row)?))
    }
}
