use chrono::Utc;
use cpg_common::Money;
use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{ConfirmedLineItem, ConfirmedOrder, ExternalRef, PaymentStatus, PendingLineItem, PendingOrder},
    traits::OrderStoreError,
};

/// Writes the confirmed counterpart of a pending order. Customer fields are copied from the pending record; the
/// total and payment status come from the gateway's payment record and nowhere else.
pub async fn insert_from_pending(
    order: &PendingOrder,
    total: Money,
    status: &PaymentStatus,
    conn: &mut SqliteConnection,
) -> Result<ConfirmedOrder, OrderStoreError> {
    let confirmed = sqlx::query_as::<_, ConfirmedOrder>(
        r#"
            INSERT INTO confirmed_orders (
                external_ref,
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
                monto_total,
                estado_pago,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING *;
        "#,
    )
    .bind(&order.external_ref)
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
    .bind(total)
    .bind(status.to_string())
    .bind(Utc::now())
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Confirmed order #{} written for reference [{}]", confirmed.id, confirmed.external_ref);
    Ok(confirmed)
}

pub async fn insert_line_item(
    order_id: i64,
    item: &PendingLineItem,
    conn: &mut SqliteConnection,
) -> Result<ConfirmedLineItem, OrderStoreError> {
    let item = sqlx::query_as(
        r#"
            INSERT INTO confirmed_order_items (order_id, producto, precio_unitario, imagen, cantidad, talle, color)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *;
        "#,
    )
    .bind(order_id)
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
) -> Result<Option<ConfirmedOrder>, OrderStoreError> {
    let order = sqlx::query_as("SELECT * FROM confirmed_orders WHERE external_ref = $1")
        .bind(external_ref)
        .fetch_optional(conn)
        .await?;
    Ok(order)
}

pub async fn fetch_line_items(
    order_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<ConfirmedLineItem>, OrderStoreError> {
    let items = sqlx::query_as("SELECT * FROM confirmed_order_items WHERE order_id = $1 ORDER BY id")
        .bind(order_id)
        .fetch_all(conn)
        .await?;
    Ok(items)
}

pub async fn exists(external_ref: &ExternalRef, conn: &mut SqliteConnection) -> Result<bool, OrderStoreError> {
    let exists = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM confirmed_orders WHERE external_ref = $1)")
        .bind(external_ref)
        .fetch_one(conn)
        .await?;
    Ok(exists)
}
