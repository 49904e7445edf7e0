// Faculty endpoints

use super::models::FacultyProfile;
use crate::error::Result;
use crate::gateway::HttpGateway;

pub struct FacultyApi<'a> {
    gateway: &'a HttpGateway,
}

impl<'a> FacultyApi<'a> {
    pub fn new(gateway: &'a HttpGateway) -> Self {
        Self { gateway }
    }

    pub async fn profile(&self) -> Result<FacultyProfile> {
        Ok(self.gateway.get_json("/faculty/profile").await?)
    }

    pub async fn edit_profile(&self, profile: &FacultyProfile) -> Result<String> {
        Ok(self
            .gateway
            .post_json_text("/faculty/edit-profile", profile)
            .await?)
    }
}
