// Notice board, shared by every role

use reqwest::multipart::Form;

use super::models::Notice;
use super::upload::{require, FileUpload};
use crate::error::Result;
use crate::gateway::HttpGateway;

pub struct CommonApi<'a> {
    gateway: &'a HttpGateway,
}

impl<'a> CommonApi<'a> {
    pub fn new(gateway: &'a HttpGateway) -> Self {
        Self { gateway }
    }

    pub async fn post_notice(&self, title: &str, description: &str, file: FileUpload) -> Result<String> {
        require("title", title)?;
        require("description", description)?;

        let form = Form::new()
            .text("title", title.to_string())
            .text("description", description.to_string())
            .part("file", file.into_part()?);

        Ok(self.gateway.post_multipart("/comm/post/notice", form).await?)
    }

    pub async fn notices(&self) -> Result<Vec<Notice>> {
        Ok(self.gateway.get_json("/comm/get/notices").await?)
    }

    pub async fn view_notice(&self, notice_id: i64) -> Result<Vec<u8>> {
        Ok(self
            .gateway
            .get_bytes(&format!("/comm/notice/{}/view", notice_id))
            .await?)
    }
}
