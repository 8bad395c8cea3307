use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{ExternalRef, NewLineItem, NewPendingOrder, PendingLineItem, PendingOrder},
    traits::OrderStoreError,
};

/// Inserts a new pending order using the given connection. Not atomic on its own; embed the call in a transaction
/// and pass `&mut *tx` when the line items must land in the same unit.
///
/// The `external_ref` column is unique, so a reused reference fails with
/// [`OrderStoreError::DuplicateOrder`] and writes nothing.
pub async fn insert_order(
    order: &NewPendingOrder,
    conn: &mut SqliteConnection,
) -> Result<PendingOrder, OrderStoreError> {
    let inserted = sqlx::query_as::<_, PendingOrder>(
        r#"
            INSERT INTO pending_orders (
                external_ref,
                preference_id,
                nombre,
                apellido,
                email,
                documento,
                direccion,
                provincia,
                ciudad,
                codigo_postal,
                celular,
                tipo_envio,
                empresa_envio,
                pais,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *;
        "#,
    )
    .bind(&order.external_ref)
    .bind(&order.preference_id)
    .bind(&order.customer.nombre)
    .bind(&order.customer.apellido)
    .bind(&order.customer.email)
    .bind(&order.customer.documento)
    .bind(&order.customer.direccion)
    .bind(&order.customer.provincia)
    .bind(&order.customer.ciudad)
    .bind(&order.customer.codigo_postal)
    .bind(&order.customer.celular)
    .bind(&order.customer.tipo_envio)
    .bind(&order.customer.empresa_envio)
    .bind(&order.customer.pais)
    .bind(order.created_at)
    .fetch_one(conn)
    .await;
    match inserted {
        Ok(order) => {
            debug!("🗃️ Pending order [{}] inserted with id {}", order.external_ref, order.id);
            Ok(order)
        },
        Err(sqlx::Error::Database(de)) if de.is_unique_violation() => {
            Err(OrderStoreError::DuplicateOrder(order.external_ref.clone()))
        },
        Err(e) => Err(e.into()),
    }
}

pub async fn insert_line_item(
    external_ref: &ExternalRef,
    item: &NewLineItem,
    conn: &mut SqliteConnection,
) -> Result<PendingLineItem, OrderStoreError> {
    let item = sqlx::query_as(
        r#"
            INSERT INTO pending_order_items (external_ref, producto, precio_unitario, imagen, cantidad, talle, color)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *;
        "#,
    )
    .bind(external_ref)
    .bind(&item.producto)
    .bind(item.precio_unitario)
    .bind(&item.imagen)
    .bind(item.cantidad)
    .bind(&item.talle)
    .bind(&item.color)
    .fetch_one(conn)
    .await?;
    Ok(item)
}

pub async fn fetch_order(
    external_ref: &ExternalRef,
    conn: &mut SqliteConnection,
) -> Result<Option<PendingOrder>, OrderStoreError> {
    let order = sqlx::query_as("SELECT * FROM pending_orders WHERE external_ref = $1")
        .bind(external_ref)
        .fetch_optional(conn)
        .await?;
    Ok(order)
}

pub async fn fetch_line_items(
    external_ref: &ExternalRef,
    conn: &mut SqliteConnection,
) -> Result<Vec<PendingLineItem>, OrderStoreError> {
    let items = sqlx::query_as("SELECT * FROM pending_order_items WHERE external_ref = $1 ORDER BY id")
        .bind(external_ref)
        .fetch_all(conn)
        .await?;
    Ok(items)
}

/// Removes and returns the pending order for the given reference. This conditional delete is the reconciliation
/// gate: of any number of concurrent callers for the same reference, at most one gets the row back.
pub async fn take_order(
    external_ref: &ExternalRef,
    conn: &mut SqliteConnection,
) -> Result<Option<PendingOrder>, OrderStoreError> {
    let order = sqlx::query_as("DELETE FROM pending_orders WHERE external_ref = $1 RETURNING *")
        .bind(external_ref)
        .fetch_optional(conn)
        .await?;
    Ok(order)
}

/// Removes and returns all line items for the given reference.
pub async fn take_line_items(
    external_ref: &ExternalRef,
    conn: &mut SqliteConnection,
) -> Result<Vec<PendingLineItem>, OrderStoreError> {
    let items = sqlx::query_as("DELETE FROM pending_order_items WHERE external_ref = $1 RETURNING *")
        .bind(external_ref)
        .fetch_all(conn)
        .await?;
    Ok(items)
}
