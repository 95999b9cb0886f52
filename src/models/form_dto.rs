use utoipa::ToSchema;

/// Shape of the `multipart/form-data` body accepted by `/upload`. Only used to
/// describe the request in the OpenAPI document; the body itself is bound into
/// `ImageUpload`.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ImageForm {
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}
