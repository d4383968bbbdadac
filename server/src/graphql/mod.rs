use std::sync::Arc;

use async_graphql::{
    Context, EmptySubscription, Error, ErrorExtensions, ID, Object, Schema, SimpleObject,
};
use platform_api::{ApiError, internal_error};
use platform_store::DynStore;
use products_tips::{Employee, EmployeeDraft, EmployeeId, Outcome, TipBoard, TipsError};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::instrument;

/// The single board, shared by every request. The lock serialises mutations.
pub type SharedBoard = Arc<Mutex<TipBoard<DynStore>>>;

pub type SchemaType = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(board: SharedBoard) -> SchemaType {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(board)
        .finish()
}

#[derive(Default)]
pub struct QueryRoot;

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl QueryRoot {
    #[instrument(name = "graphql.health", skip_all)]
    async fn health(&self) -> HealthPayload {
        HealthPayload { ok: true }
    }

    #[instrument(name = "graphql.version", skip_all)]
    async fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    #[instrument(name = "graphql.board", skip_all)]
    async fn board(&self, ctx: &Context<'_>) -> async_graphql::Result<BoardNode> {
        let board = shared_board(ctx)?;
        let board = board.lock().await;
        Ok(BoardNode::from_board(&board))
    }

    #[instrument(name = "graphql.employee", skip_all)]
    async fn employee(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<Option<EmployeeNode>> {
        let id = parse_id(&id)?;
        let board = shared_board(ctx)?;
        let board = board.lock().await;
        Ok(board.employee(id).map(EmployeeNode::from))
    }
}

#[Object]
impl MutationRoot {
    /// Adds `amount` to the pool and recomputes every share.
    #[instrument(name = "graphql.fund_pool", skip_all)]
    async fn fund_pool(
        &self,
        ctx: &Context<'_>,
        amount: f64,
    ) -> async_graphql::Result<MutationPayload> {
        let board = shared_board(ctx)?;
        let mut board = board.lock().await;
        let outcome = board.fund_pool(amount).map_err(storage_error)?;
        Ok(MutationPayload::new(outcome, &board))
    }

    /// Forgets the pool total. Shares keep their last values.
    #[instrument(name = "graphql.clear_pool", skip_all)]
    async fn clear_pool(&self, ctx: &Context<'_>) -> async_graphql::Result<MutationPayload> {
        let board = shared_board(ctx)?;
        let mut board = board.lock().await;
        let outcome = board.clear_pool().map_err(storage_error)?;
        Ok(MutationPayload::new(outcome, &board))
    }

    #[instrument(name = "graphql.add_employee", skip_all)]
    async fn add_employee(
        &self,
        ctx: &Context<'_>,
        name: String,
        hours: f64,
    ) -> async_graphql::Result<MutationPayload> {
        let board = shared_board(ctx)?;
        let mut board = board.lock().await;
        let outcome = board.add_employee(&name, hours).map_err(storage_error)?;
        Ok(MutationPayload::new(outcome, &board))
    }

    /// Removes an employee without recomputing the remaining shares.
    #[instrument(name = "graphql.remove_employee", skip_all)]
    async fn remove_employee(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<MutationPayload> {
        let id = parse_id(&id)?;
        let board = shared_board(ctx)?;
        let mut board = board.lock().await;
        let outcome = board.remove_employee(id).map_err(storage_error)?;
        Ok(MutationPayload::new(outcome, &board))
    }

    /// Removes an employee and returns its values for re-submission through
    /// `addEmployee`. Null when the id is unknown.
    #[instrument(name = "graphql.edit_employee", skip_all)]
    async fn edit_employee(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<Option<EmployeeDraftNode>> {
        let id = parse_id(&id)?;
        let board = shared_board(ctx)?;
        let mut board = board.lock().await;
        let draft = board.edit_employee(id).map_err(storage_error)?;
        Ok(draft.map(EmployeeDraftNode::from))
    }
}

#[derive(Clone, Debug, SimpleObject, Serialize)]
pub struct HealthPayload {
    pub ok: bool,
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "Employee")]
pub struct EmployeeNode {
    pub id: ID,
    pub name: String,
    pub hours: f64,
    pub share: f64,
}

impl From<&Employee> for EmployeeNode {
    fn from(emp: &Employee) -> Self {
        Self {
            id: ID::from(emp.id.to_string()),
            name: emp.name.clone(),
            hours: emp.hours,
            share: emp.share,
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "EmployeeDraft")]
pub struct EmployeeDraftNode {
    pub name: String,
    pub hours: f64,
}

impl From<EmployeeDraft> for EmployeeDraftNode {
    fn from(draft: EmployeeDraft) -> Self {
        Self {
            name: draft.name,
            hours: draft.hours,
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "Board")]
pub struct BoardNode {
    pub pool: Option<f64>,
    pub total_hours: f64,
    pub price_per_hour: Option<f64>,
    pub headcount: String,
    pub employees: Vec<EmployeeNode>,
}

impl BoardNode {
    fn from_board(board: &TipBoard<DynStore>) -> Self {
        Self {
            pool: board.pool(),
            total_hours: board.total_hours(),
            price_per_hour: board.price_per_hour(),
            headcount: board.headcount_label(),
            employees: board.employees().iter().map(EmployeeNode::from).collect(),
        }
    }
}

/// Rejected input is reported as `applied: false`, never as an error.
#[derive(Clone, Debug, SimpleObject)]
pub struct MutationPayload {
    pub applied: bool,
    pub board: BoardNode,
}

impl MutationPayload {
    fn new(outcome: Outcome, board: &TipBoard<DynStore>) -> Self {
        Self {
            applied: outcome.is_applied(),
            board: BoardNode::from_board(board),
        }
    }
}

fn shared_board(ctx: &Context<'_>) -> async_graphql::Result<SharedBoard> {
    ctx.data::<SharedBoard>()
        .cloned()
        .map_err(|_| internal_error(anyhow::anyhow!("missing tip board")))
}

fn parse_id(id: &ID) -> async_graphql::Result<EmployeeId> {
    id.as_str()
        .parse()
        .map_err(|_| ApiError::invalid_input("employee id must be numeric").extend())
}

fn storage_error(err: TipsError) -> Error {
    ApiError::storage(err).extend()
}
