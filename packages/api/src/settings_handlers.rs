// ABOUTME: HTTP handlers for the settings admin screens and the ajax save action
// ABOUTME: Screens render the panel with its assets; ajax dispatches on `action`

use axum::{
    extract::{Query, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Form,
};
use rstore_core::constants::{POST_TYPE, SAVE_ACTION};
use rstore_core::{html_escape, Asset, AssetKind, InProcessHost};
use rstore_settings::Submission;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::error::AppError;
use crate::response::{ajax_response, AjaxResponse};
use crate::AppState;

/// Handle `POST /wp-admin/admin-ajax.php`
pub async fn admin_ajax(
    State(state): State<AppState>,
    Form(submission): Form<Submission>,
) -> Result<Response, AppError> {
    let action = submission.get("action").unwrap_or_default().to_string();
    debug!(action = %action, "Ajax request");

    match action.as_str() {
        SAVE_ACTION => {
            state.controller.save(&submission, state.user_id).await?;
            Ok(ajax_response(StatusCode::OK, AjaxResponse::success()))
        }
        _ => Err(AppError::UnknownAction(action)),
    }
}

/// Handle `GET /wp-admin/{*screen}`
pub async fn admin_screen(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    uri: Uri,
) -> Result<Response, AppError> {
    if let Some(post_id) = edited_post_id(&uri, &params) {
        return post_edit_screen(&state, post_id);
    }

    let request_uri = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());

    let Some(panel) = state
        .controller
        .edit_settings(request_uri, state.user_id)
        .await?
    else {
        return Err(AppError::NotFound);
    };

    // Assets are queued per request
    let host = InProcessHost::default();
    state.controller.admin_enqueue_scripts(&host, request_uri);

    info!(request_uri = %request_uri, "Rendering settings screen");
    Ok(Html(admin_page(&host.assets(), &panel)).into_response())
}

/// Item id of a `post.php?post=<id>&action=edit` request
fn edited_post_id(uri: &Uri, params: &HashMap<String, String>) -> Option<u64> {
    let editing = params.get("action").is_some_and(|action| action == "edit");
    if !uri.path().ends_with("/post.php") || !editing {
        return None;
    }
    params.get("post")?.parse().ok()
}

/// Content item edit screen: the meta boxes registered for the product screen
fn post_edit_screen(state: &AppState, post_id: u64) -> Result<Response, AppError> {
    let mut body = String::new();

    for meta_box in state.host.meta_boxes() {
        if meta_box.screen != POST_TYPE {
            continue;
        }
        let rendered = state
            .controller
            .render_meta_box(state.host.as_ref(), &meta_box.id, post_id);
        let Some(inner) = rendered else {
            continue;
        };
        body.push_str(&format!(
            "<div id=\"{}\" class=\"postbox {}\">\n<h2 class=\"hndle\">{}</h2>\n",
            html_escape(&meta_box.id),
            html_escape(&meta_box.context),
            html_escape(&meta_box.title)
        ));
        body.push_str(&format!("<div class=\"inside\">{}</div>\n</div>\n", inner));
    }

    if body.is_empty() {
        return Err(AppError::NotFound);
    }

    info!(post_id, "Rendering product edit screen");
    Ok(Html(admin_page(&[], &body)).into_response())
}

/// Minimal admin document around the panel markup
fn admin_page(assets: &[Asset], body: &str) -> String {
    let mut head = String::new();
    let mut footer = String::new();

    for asset in assets {
        let src = html_escape(&format!("{}?ver={}", asset.src, asset.version));
        let id = html_escape(&asset.handle);
        match asset.kind {
            AssetKind::Style => head.push_str(&format!(
                "<link rel=\"stylesheet\" id=\"{}-css\" href=\"{}\">\n",
                id, src
            )),
            AssetKind::Script => {
                let tag = format!("<script id=\"{}-js\" src=\"{}\"></script>\n", id, src);
                if asset.in_footer {
                    footer.push_str(&tag);
                } else {
                    head.push_str(&tag);
                }
            }
        }
    }

    format!(
        concat!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n",
            "<title>Reseller Store Settings</title>\n{}</head>\n",
            "<body class=\"wp-admin\">\n{}{}</body>\n</html>\n"
        ),
        head, body, footer
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstore_core::AdminHost;

    #[test]
    fn test_admin_page_places_assets() {
        let host = InProcessHost::default();
        host.enqueue(Asset {
            kind: AssetKind::Style,
            handle: "rstore-settings-css".to_string(),
            src: "/assets/css/advanced-settings.min.css".to_string(),
            deps: Vec::new(),
            version: "1.0.0".to_string(),
            in_footer: false,
        });
        host.enqueue(Asset {
            kind: AssetKind::Script,
            handle: "rstore-settings".to_string(),
            src: "/assets/js/advanced-settings.min.js".to_string(),
            deps: vec!["jquery".to_string()],
            version: "1.0.0".to_string(),
            in_footer: true,
        });

        let page = admin_page(&host.assets(), "<div class=\"wrap\"></div>\n");

        let head_end = page.find("</head>").unwrap();
        let style = page.find("advanced-settings.min.css?ver=1.0.0").unwrap();
        let script = page.find("advanced-settings.min.js?ver=1.0.0").unwrap();
        let body = page.find("<div class=\"wrap\">").unwrap();
        assert!(style < head_end);
        assert!(script > body);
    }
}
