use std::fmt::Display;

use checkout_engine::db_types::{CustomerDetails, NewLineItem};
use cpg_common::Money;
use serde::{Deserialize, Serialize};

use crate::errors::ServerError;

//----------------------------------------------   Checkout request  ---------------------------------------------------

/// A checkout submission from the storefront.
///
/// The canonical shape carries a single product in the top-level `title`/`quantity`/`price` fields; carts with more
/// than one product arrive with the lines spelled out in `products`. The top-level fields are mandatory either way
/// and serve as the validation gate.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    #[serde(default)]
    pub price: Option<PriceField>,
    #[serde(default, rename = "formData")]
    pub form_data: Option<CustomerForm>,
    #[serde(default)]
    pub products: Vec<CartItem>,
}

fn default_quantity() -> i64 {
    1
}

impl CheckoutRequest {
    /// Validates the submission and splits it into the customer record and the line items to store.
    pub fn try_into_order_parts(self) -> Result<(CustomerDetails, Vec<NewLineItem>), ServerError> {
        let Some(form) = self.form_data else {
            return Err(ServerError::ValidationError("The checkout form data is missing.".to_string()));
        };
        if self.title.is_empty() {
            return Err(ServerError::ValidationError("The checkout is missing a product title.".to_string()));
        }
        let Some(price) = self.price else {
            return Err(ServerError::ValidationError("The checkout is missing a price.".to_string()));
        };
        let price = price.to_money()?;
        if self.quantity < 1 {
            return Err(ServerError::ValidationError(format!("Invalid quantity ({}).", self.quantity)));
        }
        let items = if self.products.is_empty() {
            vec![NewLineItem::new(self.title, price, self.quantity)]
        } else {
            self.products.into_iter().map(CartItem::try_into_line_item).collect::<Result<Vec<_>, _>>()?
        };
        Ok((form.into_customer_details(), items))
    }
}

/// Prices arrive as a JSON number from current storefront builds and as a numeric string from older ones.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PriceField {
    Number(f64),
    Text(String),
}

impl PriceField {
    pub fn to_money(&self) -> Result<Money, ServerError> {
        let pesos = match self {
            PriceField::Number(v) => *v,
            PriceField::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| ServerError::ValidationError(format!("The price must be a number, not '{s}'.")))?,
        };
        Money::try_from(pesos).map_err(|e| ServerError::ValidationError(e.to_string()))
    }
}

/// One line of the storefront cart. Older storefront builds send English field names, so both are accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct CartItem {
    #[serde(alias = "title", alias = "nombre")]
    pub producto: String,
    #[serde(alias = "price")]
    pub precio: PriceField,
    #[serde(default, alias = "image")]
    pub imagen: String,
    #[serde(default = "default_quantity", alias = "quantity")]
    pub cantidad: i64,
    #[serde(default, alias = "size")]
    pub talle: String,
    #[serde(default)]
    pub color: String,
}

impl CartItem {
    pub fn try_into_line_item(self) -> Result<NewLineItem, ServerError> {
        if self.producto.is_empty() {
            return Err(ServerError::ValidationError("Every cart item needs a product name.".to_string()));
        }
        if self.cantidad < 1 {
            return Err(ServerError::ValidationError(format!(
                "Invalid quantity ({}) for {}.",
                self.cantidad, self.producto
            )));
        }
        let precio = self.precio.to_money()?;
        let mut item = NewLineItem::new(self.producto, precio, self.cantidad);
        item.imagen = self.imagen;
        item.talle = self.talle;
        item.color = self.color;
        Ok(item)
    }
}

//----------------------------------------------   Customer form  ------------------------------------------------------

/// The storefront's shipping form. Every field is optional on the wire; whatever is missing is stored as an empty
/// string so the order record always carries the full column set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CustomerForm {
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub documento: String,
    pub direccion: String,
    pub calle: String,
    pub numero: String,
    pub provincia: String,
    pub ciudad: String,
    #[serde(alias = "codigoPostal")]
    pub codigo_postal: String,
    pub celular: String,
    #[serde(alias = "tipoEnvio")]
    pub tipo_envio: String,
    #[serde(alias = "empresaEnvio")]
    pub empresa_envio: String,
    pub pais: CountryField,
}

impl CustomerForm {
    /// Flattens the form into the engine's customer record. Two normalizations happen here: a country submitted as
    /// a `{label, value}` object is reduced to its label, and a street submitted as separate `calle`/`numero`
    /// fields is joined into the single stored address line.
    pub fn into_customer_details(self) -> CustomerDetails {
        let direccion = if self.direccion.is_empty() {
            format!("{} {}", self.calle, self.numero).trim().to_string()
        } else {
            self.direccion
        };
        let pais = self.pais.into_label();
        CustomerDetails {
            nombre: self.nombre,
            apellido: self.apellido,
            email: self.email,
            documento: self.documento,
            direccion,
            provincia: self.provincia,
            ciudad: self.ciudad,
            codigo_postal: self.codigo_postal,
            celular: self.celular,
            tipo_envio: self.tipo_envio,
            empresa_envio: self.empresa_envio,
            pais,
        }
    }
}

/// The country field as submitted by the storefront: either a plain string, or the `{label, value}` pair that a
/// react-select widget produces.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CountryField {
    Labelled {
        #[serde(default)]
        label: String,
    },
    Plain(String),
}

impl Default for CountryField {
    fn default() -> Self {
        CountryField::Plain(String::new())
    }
}

impl CountryField {
    pub fn into_label(self) -> String {
        match self {
            CountryField::Labelled { label } => label,
            CountryField::Plain(s) => s,
        }
    }
}

//----------------------------------------------   Responses  ----------------------------------------------------------

/// The successful reply to a checkout: where to send the shopper, and the token that ties the eventual payment
/// notification back to this order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub init_point: String,
    pub preference_id: String,
    pub external_reference: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { success: true, message: message.to_string() }
    }

    pub fn failure<S: Display>(message: S) -> Self {
        Self { success: false, message: message.to_string() }
    }
}
