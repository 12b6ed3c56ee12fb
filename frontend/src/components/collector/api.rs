//! Calls to the backend sinks. Each returns a message-ready `Result` with the
//! error already turned into user-facing text.

use gloo_net::http::{Request, Response};

use common::model::submission::Submission;
use common::requests::{
    AdminCredentials, AdminDelete, AdminLoginResponse, AdminQuery, AuditBatch, SubmissionList,
    SyncResponse,
};

/// A downloaded file: name from `Content-Disposition` and its bytes.
pub struct Download {
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

async fn failure(response: Response) -> String {
    let status = response.status();
    match response.text().await {
        Ok(body) if !body.trim().is_empty() => body,
        _ => format!("Server answered {}", status),
    }
}

async fn into_download(response: Response) -> Result<Download, String> {
    if !response.ok() {
        return Err(failure(response).await);
    }
    let file_name = response
        .headers()
        .get("content-disposition")
        .and_then(|h| super::helpers::file_name_from_disposition(&h));
    let bytes = response.binary().await.map_err(|e| e.to_string())?;
    Ok(Download { file_name, bytes })
}

pub async fn export_batch(batch: &AuditBatch) -> Result<Download, String> {
    let response = Request::post("/api/audits/export")
        .json(batch)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    into_download(response).await
}

pub async fn sync_batch(batch: &AuditBatch) -> Result<usize, String> {
    let response = Request::post("/api/audits/sync")
        .json(batch)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !response.ok() {
        return Err(failure(response).await);
    }
    let body: SyncResponse = response.json().await.map_err(|e| e.to_string())?;
    Ok(body.stored)
}

pub async fn admin_login(credentials: &AdminCredentials) -> Result<bool, String> {
    let response = Request::post("/api/admin/login")
        .json(credentials)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !response.ok() {
        return Err(failure(response).await);
    }
    let body: AdminLoginResponse = response.json().await.map_err(|e| e.to_string())?;
    Ok(body.granted)
}

pub async fn list_submissions(query: &AdminQuery) -> Result<Vec<Submission>, String> {
    let response = Request::post("/api/admin/submissions")
        .json(query)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !response.ok() {
        return Err(failure(response).await);
    }
    let body: SubmissionList = response.json().await.map_err(|e| e.to_string())?;
    Ok(body.submissions)
}

pub async fn delete_submission(request: &AdminDelete) -> Result<(), String> {
    let response = Request::post("/api/admin/submissions/delete")
        .json(request)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if response.ok() {
        Ok(())
    } else {
        Err(failure(response).await)
    }
}

pub async fn export_submissions(query: &AdminQuery) -> Result<Download, String> {
    let response = Request::post("/api/admin/export")
        .json(query)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    into_download(response).await
}
