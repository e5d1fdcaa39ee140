use crate::application::error::ApplicationError;
use crate::application::input::WatermarkOptions;
use crate::application::watermark_service::WatermarkService;
use crate::domain::output_format::OutputFormat;
use axum::{
    extract::{DefaultBodyLimit, Multipart, Query, State},
    http::{header, HeaderName},
    response::IntoResponse,
    routing::post,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info};

const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub watermark_service: Arc<WatermarkService>,
}

// Query parameters of POST /watermark
#[derive(Deserialize, Debug, Default)]
pub struct WatermarkParams {
    pub opacity: Option<String>,
    pub position: Option<String>,
    pub x: Option<String>,
    pub y: Option<String>,
    #[serde(rename = "useAlpha")]
    pub use_alpha: Option<String>,
    #[serde(rename = "transparencyColor")]
    pub transparency_color: Option<String>,
    #[serde(rename = "outputFormat")]
    pub output_format: Option<String>,
}

impl WatermarkParams {
    pub fn to_options(&self) -> WatermarkOptions {
        let position = match (&self.x, &self.y) {
            (Some(x), Some(y)) => Some(format!("{x} {y}")),
            _ => None,
        };
        WatermarkOptions {
            use_alpha: self.use_alpha.as_deref().is_some_and(|v| v.eq_ignore_ascii_case("yes") || v == "true"),
            transparency_color: self.transparency_color.clone(),
            opacity: self.opacity.clone().unwrap_or_default(),
            position_method: self.position.clone().unwrap_or_else(|| "grid".to_string()),
            position,
        }
    }

    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::from_name(self.output_format.as_deref().unwrap_or("png"))
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(vec![HeaderName::from_static("content-type")]);

    Router::new()
        .route("/watermark", post(watermark_handler))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub async fn watermark_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WatermarkParams>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApplicationError> {
    let mut image_bytes = None;
    let mut watermark_bytes = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApplicationError::InvalidRequest(format!("Multipart error: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApplicationError::InvalidRequest(format!("Failed to read bytes from multipart field: {}", e)))?;
        debug!(field = %name, bytes = data.len(), "received multipart field");
        match name.as_str() {
            "image" => image_bytes = Some(data),
            "watermark" => watermark_bytes = Some(data),
            _ => {}
        }
    }

    let image_bytes = image_bytes.ok_or_else(|| ApplicationError::InvalidRequest("missing field `image`".to_string()))?;
    let watermark_bytes =
        watermark_bytes.ok_or_else(|| ApplicationError::InvalidRequest("missing field `watermark`".to_string()))?;

    let (processed_image_data, content_type) = state
        .watermark_service
        .watermark_bytes(&image_bytes, &watermark_bytes, &params.to_options(), params.output_format())
        .await?;
    info!(bytes = processed_image_data.len(), content_type, "served watermarked image");

    Ok(([(header::CONTENT_TYPE, content_type)], processed_image_data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::image_codec::DefaultImageCodec;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;
    use tower::ServiceExt;

    const BOUNDARY: &str = "watermarker-test-boundary";

    fn app() -> Router {
        let codec = Arc::new(DefaultImageCodec::new());
        router(AppState {
            watermark_service: Arc::new(WatermarkService::new(codec)),
        })
    }

    fn png(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        RgbImage::from_pixel(width, height, Rgb(color))
            .write_to(&mut buffer, ImageFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    fn multipart_body(files: &[(&str, &[u8])]) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, bytes) in files {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{name}.png\"\r\nContent-Type: image/png\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn post(uri: &str, files: &[(&str, &[u8])]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
            .body(Body::from(multipart_body(files)))
            .unwrap()
    }

    async fn error_message(resp: axum::response::Response) -> String {
        let bytes = hyper::body::to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        json["error"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_post_watermark_returns_jpeg() {
        let base = png(4, 4, [100, 100, 100]);
        let mark = png(2, 2, [200, 0, 0]);

        let resp = app()
            .oneshot(post(
                "/watermark?opacity=100&position=grid&outputFormat=jpg",
                &[("image", base.as_slice()), ("watermark", mark.as_slice())],
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "image/jpeg");
        let bytes = hyper::body::to_bytes(resp.into_body()).await.unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (4, 4));
    }

    #[tokio::test]
    async fn test_post_watermark_single_position_png() {
        let base = png(4, 4, [100, 100, 100]);
        let mark = png(2, 2, [200, 0, 0]);

        let resp = app()
            .oneshot(post(
                "/watermark?opacity=50&position=single&x=1&y=1",
                &[("image", base.as_slice()), ("watermark", mark.as_slice())],
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "image/png");
        let bytes = hyper::body::to_bytes(resp.into_body()).await.unwrap();
        let rgb = image::load_from_memory(&bytes).unwrap().to_rgb8();
        assert_eq!(rgb.get_pixel(0, 0), &Rgb([100, 100, 100]));
        assert_eq!(rgb.get_pixel(1, 1), &Rgb([150, 50, 50]));
        assert_eq!(rgb.get_pixel(2, 2), &Rgb([150, 50, 50]));
        assert_eq!(rgb.get_pixel(3, 3), &Rgb([100, 100, 100]));
    }

    #[tokio::test]
    async fn test_post_watermark_missing_field() {
        let base = png(4, 4, [100, 100, 100]);

        let resp = app()
            .oneshot(post("/watermark?opacity=50", &[("image", base.as_slice())]))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_message(resp).await, "missing field `watermark`");
    }

    #[tokio::test]
    async fn test_post_watermark_rejects_bad_opacity() {
        let base = png(4, 4, [100, 100, 100]);
        let mark = png(2, 2, [200, 0, 0]);

        let resp = app()
            .oneshot(post("/watermark?opacity=abc", &[("image", base.as_slice()), ("watermark", mark.as_slice())]))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_message(resp).await, "The transparency percentage isn't an integer number.");
    }

    #[test]
    fn test_params_to_options() {
        let params = WatermarkParams {
            opacity: Some("40".to_string()),
            position: Some("single".to_string()),
            x: Some("3".to_string()),
            y: Some("4".to_string()),
            use_alpha: Some("Yes".to_string()),
            transparency_color: None,
            output_format: Some("jpg".to_string()),
        };
        let options = params.to_options();
        assert!(options.use_alpha);
        assert_eq!(options.opacity, "40");
        assert_eq!(options.position_method, "single");
        assert_eq!(options.position.as_deref(), Some("3 4"));
        assert_eq!(params.output_format(), OutputFormat::Jpeg);
    }

    #[test]
    fn test_params_defaults() {
        let params = WatermarkParams::default();
        let options = params.to_options();
        assert!(!options.use_alpha);
        assert_eq!(options.position_method, "grid");
        assert_eq!(options.position, None);
        assert_eq!(params.output_format(), OutputFormat::Png);
    }
}
