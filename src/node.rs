//! Node bindings for the editor UI.

use napi_derive::napi;

use crate::carousel::banner;
use crate::carousel::payload::CarouselPayload;
use crate::carousel::ratio::reduce_aspect_ratio as reduce;
use crate::carousel::validate::validate_for_export;
use crate::carousel::{GroupingContext, ImageEntry};
use crate::config::EditorConfig;
use crate::error::CarouselError;

#[napi(object)]
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct JsGroupingContext {
    pub display_type: String,
    pub category: String,
    pub page_id: String,
    pub custom_page_id: Option<String>,
    pub position: String,
    pub aspect_ratio: String,
    pub priority: Option<i64>,
}

impl TryFrom<JsGroupingContext> for GroupingContext {
    type Error = CarouselError;

    fn try_from(ctx: JsGroupingContext) -> Result<Self, Self::Error> {
        Ok(Self {
            display_type: ctx.display_type.parse()?,
            category: ctx.category,
            page_id: ctx.page_id,
            custom_page_id: ctx.custom_page_id.unwrap_or_default(),
            position: ctx.position,
            aspect_ratio: ctx.aspect_ratio,
            priority: ctx.priority,
        })
    }
}

fn to_napi(err: CarouselError) -> napi::Error {
    napi::Error::from_reason(err.to_string())
}

#[napi]
pub fn derive_banner_id(ctx: JsGroupingContext, index: u32) -> napi::Result<String> {
    let ctx = GroupingContext::try_from(ctx).map_err(to_napi)?;
    Ok(banner::derive_banner_id(&ctx, index as usize))
}

#[napi]
pub fn reduce_aspect_ratio(width: u32, height: u32) -> String {
    reduce(width, height)
}

#[napi]
pub fn page_ids_for(category: String) -> Vec<String> {
    EditorConfig::default().page_ids_for(&category)
}

/// Violation messages for an export record, empty when it could be exported.
#[napi]
pub fn validate_carousel_json(input: String) -> napi::Result<Vec<String>> {
    let payload = CarouselPayload::from_json(&input).map_err(to_napi)?;
    let ctx = GroupingContext {
        display_type: payload.display_type,
        page_id: payload.page_id.clone(),
        position: payload.position.as_ref().map(|p| p.as_text()).unwrap_or_default(),
        aspect_ratio: payload.aspect_ratio.clone(),
        priority: payload.priority,
        ..GroupingContext::default()
    };
    let entries: Vec<ImageEntry> = payload
        .content
        .into_iter()
        .map(|entry| entry.into_entry(&payload.aspect_ratio))
        .collect();

    Ok(match validate_for_export(&ctx, &entries) {
        Ok(()) => Vec::new(),
        Err(report) => report
            .violations()
            .iter()
            .map(|violation| violation.to_string())
            .collect(),
    })
}

/// Decode a possibly double-encoded record and re-encode it canonically.
#[napi]
pub fn normalize_carousel_json(input: String) -> napi::Result<String> {
    CarouselPayload::from_json(&input)
        .and_then(|payload| payload.to_json())
        .map_err(to_napi)
}
