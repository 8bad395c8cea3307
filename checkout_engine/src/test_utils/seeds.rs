//! Canned storefront data for order-flow tests.
use cpg_common::Money;

use crate::{
    db_types::{CustomerDetails, ExternalRef, NewLineItem, NewPendingOrder, PaymentConfirmation, PaymentStatus},
    helpers::generate_external_ref,
};

pub fn sample_customer() -> CustomerDetails {
    CustomerDetails {
        nombre: "Ana".into(),
        apellido: "Pereyra".into(),
        email: "ana@example.com".into(),
        documento: "30123456".into(),
        direccion: "Av. Siempreviva 742".into(),
        provincia: "Buenos Aires".into(),
        ciudad: "La Plata".into(),
        codigo_postal: "1900".into(),
        celular: "+54 221 555 0199".into(),
        tipo_envio: "correo".into(),
        empresa_envio: "Correo Argentino".into(),
        pais: "Argentina".into(),
    }
}

/// A pending order with a fresh external reference, ready to insert.
pub fn sample_order() -> NewPendingOrder {
    NewPendingOrder::new(generate_external_ref(), sample_customer()).with_preference_id("pref-test-0001")
}

pub fn sample_items() -> Vec<NewLineItem> {
    vec![
        NewLineItem {
            producto: "Remera negra".into(),
            precio_unitario: Money::from_pesos(100),
            imagen: "https://cdn.example.com/remera-negra.jpg".into(),
            cantidad: 2,
            talle: "M".into(),
            color: "negro".into(),
        },
        NewLineItem {
            producto: "Medias".into(),
            precio_unitario: Money::from_centavos(2_550),
            imagen: String::new(),
            cantidad: 1,
            talle: "único".into(),
            color: "blanco".into(),
        },
    ]
}

/// An approved payment record for the given reference, as the status resolver would hand it over.
pub fn approved_payment(external_ref: &ExternalRef, amount: Money) -> PaymentConfirmation {
    PaymentConfirmation::new("118234765001", external_ref.clone(), PaymentStatus::Approved, amount)
}
