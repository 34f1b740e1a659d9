//! Network directory service: companies, specifications, branches and users

use std::sync::Arc;

use chrono::Utc;
use itertools::Itertools;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::application::services::{cached_list, encode, fetch, matches_search};
use crate::application::ApplicationResult;
use crate::domain::{Branch, Company, CompanySpecification, DomainError, UserAccount};
use crate::infrastructure::cache::QueryCache;
use crate::infrastructure::traits::{RecordStore, ResourceKind};

#[derive(Debug, Clone)]
pub struct NewCompany {
    pub name: String,
    pub classification: Option<String>,
    pub contact_email: Option<String>,
    pub website: Option<String>,
    pub logo: Option<String>,
    pub agent_access_url: Option<String>,
}

/// Partial company update; `last_updated` is bumped on every write.
#[derive(Debug, Clone, Default)]
pub struct CompanyPatch {
    pub name: Option<String>,
    pub classification: Option<String>,
    pub contact_email: Option<String>,
    pub website: Option<String>,
    pub logo: Option<String>,
    pub agent_access_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CompanyFilter {
    /// Substring match on the company name, case-insensitive
    pub search: Option<String>,
    pub classification: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewSpecification {
    pub company_id: String,
    pub category: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct NewBranch {
    pub name: String,
    pub address: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    pub contact_person: String,
    pub email: String,
    pub phone: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct BranchPatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub postal_code: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: String,
    pub kind: String,
    pub position: Option<String>,
    pub extension: Option<String>,
    pub social_contact: Option<String>,
    pub branch_id: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub position: Option<String>,
    pub extension: Option<String>,
    pub social_contact: Option<String>,
    pub branch_id: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Substring match on name and email, case-insensitive
    pub search: Option<String>,
    pub role: Option<String>,
    pub branch_id: Option<String>,
}

/// Service for companies, company specifications, branches and users.
pub struct DirectoryService {
    store: Arc<dyn RecordStore>,
    cache: Arc<QueryCache>,
}

impl DirectoryService {
    pub fn new(store: Arc<dyn RecordStore>, cache: Arc<QueryCache>) -> Self {
        Self { store, cache }
    }

    // ---- companies ----

    pub fn list_companies(&self, filter: &CompanyFilter) -> ApplicationResult<Vec<Company>> {
        let companies: Vec<Company> =
            cached_list(self.store.as_ref(), &self.cache, ResourceKind::Companies)?;
        Ok(companies
            .into_iter()
            .filter(|c| {
                filter
                    .search
                    .as_deref()
                    .map(|s| matches_search(&c.name, s))
                    .unwrap_or(true)
                    && filter
                        .classification
                        .as_deref()
                        .map(|cls| c.classification.as_deref() == Some(cls))
                        .unwrap_or(true)
            })
            .collect())
    }

    /// Distinct classification values, sorted, for filter menus.
    pub fn classifications(&self) -> ApplicationResult<Vec<String>> {
        let companies: Vec<Company> =
            cached_list(self.store.as_ref(), &self.cache, ResourceKind::Companies)?;
        Ok(companies
            .into_iter()
            .filter_map(|c| c.classification)
            .unique()
            .sorted()
            .collect())
    }

    pub fn get_company(&self, id: &str) -> ApplicationResult<Company> {
        fetch(self.store.as_ref(), ResourceKind::Companies, id)
    }

    #[instrument(level = "debug", skip(self, input))]
    pub fn create_company(&self, input: NewCompany) -> ApplicationResult<Company> {
        if input.name.trim().is_empty() {
            return Err(DomainError::EmptyField { field: "name" }.into());
        }
        let now = Utc::now();
        let company = Company {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            classification: input.classification,
            contact_email: input.contact_email,
            website: input.website,
            logo: input.logo,
            agent_access_url: input.agent_access_url,
            created_at: now,
            last_updated: now,
        };
        let row = encode(ResourceKind::Companies, &company)?;
        self.store.insert(ResourceKind::Companies, row)?;
        self.cache.invalidate_kind(ResourceKind::Companies);
        debug!(id = %company.id, "company created");
        Ok(company)
    }

    #[instrument(level = "debug", skip(self, patch))]
    pub fn update_company(&self, id: &str, patch: CompanyPatch) -> ApplicationResult<Company> {
        let mut company: Company = fetch(self.store.as_ref(), ResourceKind::Companies, id)?;

        if let Some(name) = patch.name {
            company.name = name;
        }
        if let Some(classification) = patch.classification {
            company.classification = Some(classification);
        }
        if let Some(contact_email) = patch.contact_email {
            company.contact_email = Some(contact_email);
        }
        if let Some(website) = patch.website {
            company.website = Some(website);
        }
        if let Some(logo) = patch.logo {
            company.logo = Some(logo);
        }
        if let Some(agent_access_url) = patch.agent_access_url {
            company.agent_access_url = Some(agent_access_url);
        }
        company.last_updated = Utc::now();

        let row = encode(ResourceKind::Companies, &company)?;
        self.store.update(ResourceKind::Companies, id, row)?;
        self.cache.invalidate_kind(ResourceKind::Companies);
        Ok(company)
    }

    /// Delete a company row. Its specifications stay behind as orphans,
    /// matching the backend's lack of cascading deletes.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_company(&self, id: &str) -> ApplicationResult<()> {
        self.store.delete(ResourceKind::Companies, id)?;
        self.cache.invalidate_kind(ResourceKind::Companies);
        Ok(())
    }

    // ---- company specifications ----

    pub fn list_specifications(
        &self,
        company_id: &str,
    ) -> ApplicationResult<Vec<CompanySpecification>> {
        let specs: Vec<CompanySpecification> = cached_list(
            self.store.as_ref(),
            &self.cache,
            ResourceKind::CompanySpecifications,
        )?;
        Ok(specs
            .into_iter()
            .filter(|s| s.company_id == company_id)
            .collect())
    }

    #[instrument(level = "debug", skip(self, input))]
    pub fn add_specification(
        &self,
        input: NewSpecification,
    ) -> ApplicationResult<CompanySpecification> {
        // The foreign key would reject this remotely; check locally too.
        self.get_company(&input.company_id)?;

        let spec = CompanySpecification {
            id: Uuid::new_v4().to_string(),
            company_id: input.company_id,
            category: input.category,
            content: input.content,
        };
        let row = encode(ResourceKind::CompanySpecifications, &spec)?;
        self.store.insert(ResourceKind::CompanySpecifications, row)?;
        self.cache
            .invalidate_kind(ResourceKind::CompanySpecifications);
        Ok(spec)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn delete_specification(&self, id: &str) -> ApplicationResult<()> {
        self.store.delete(ResourceKind::CompanySpecifications, id)?;
        self.cache
            .invalidate_kind(ResourceKind::CompanySpecifications);
        Ok(())
    }

    // ---- branches ----

    pub fn list_branches(&self, search: Option<&str>) -> ApplicationResult<Vec<Branch>> {
        let branches: Vec<Branch> =
            cached_list(self.store.as_ref(), &self.cache, ResourceKind::Branches)?;
        Ok(branches
            .into_iter()
            .filter(|b| {
                search
                    .map(|s| matches_search(&b.name, s) || matches_search(&b.city, s))
                    .unwrap_or(true)
            })
            .collect())
    }

    #[instrument(level = "debug", skip(self, input))]
    pub fn create_branch(&self, input: NewBranch) -> ApplicationResult<Branch> {
        if input.name.trim().is_empty() {
            return Err(DomainError::EmptyField { field: "name" }.into());
        }
        let branch = Branch {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            address: input.address,
            city: input.city,
            province: input.province,
            postal_code: input.postal_code,
            contact_person: input.contact_person,
            email: input.email,
            phone: input.phone,
            website: input.website,
            created_at: Utc::now(),
        };
        let row = encode(ResourceKind::Branches, &branch)?;
        self.store.insert(ResourceKind::Branches, row)?;
        self.cache.invalidate_kind(ResourceKind::Branches);
        debug!(id = %branch.id, "branch created");
        Ok(branch)
    }

    #[instrument(level = "debug", skip(self, patch))]
    pub fn update_branch(&self, id: &str, patch: BranchPatch) -> ApplicationResult<Branch> {
        let mut branch: Branch = fetch(self.store.as_ref(), ResourceKind::Branches, id)?;

        if let Some(name) = patch.name {
            branch.name = name;
        }
        if let Some(address) = patch.address {
            branch.address = address;
        }
        if let Some(city) = patch.city {
            branch.city = city;
        }
        if let Some(province) = patch.province {
            branch.province = province;
        }
        if let Some(postal_code) = patch.postal_code {
            branch.postal_code = postal_code;
        }
        if let Some(contact_person) = patch.contact_person {
            branch.contact_person = contact_person;
        }
        if let Some(email) = patch.email {
            branch.email = email;
        }
        if let Some(phone) = patch.phone {
            branch.phone = Some(phone);
        }
        if let Some(website) = patch.website {
            branch.website = Some(website);
        }

        let row = encode(ResourceKind::Branches, &branch)?;
        self.store.update(ResourceKind::Branches, id, row)?;
        self.cache.invalidate_kind(ResourceKind::Branches);
        Ok(branch)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn delete_branch(&self, id: &str) -> ApplicationResult<()> {
        self.store.delete(ResourceKind::Branches, id)?;
        self.cache.invalidate_kind(ResourceKind::Branches);
        Ok(())
    }

    // ---- users ----

    pub fn list_users(&self, filter: &UserFilter) -> ApplicationResult<Vec<UserAccount>> {
        let users: Vec<UserAccount> =
            cached_list(self.store.as_ref(), &self.cache, ResourceKind::Users)?;
        Ok(users
            .into_iter()
            .filter(|u| {
                filter
                    .search
                    .as_deref()
                    .map(|s| matches_search(&u.name, s) || matches_search(&u.email, s))
                    .unwrap_or(true)
                    && filter
                        .role
                        .as_deref()
                        .map(|r| u.role == r)
                        .unwrap_or(true)
                    && filter
                        .branch_id
                        .as_deref()
                        .map(|b| u.branch_id.as_deref() == Some(b))
                        .unwrap_or(true)
            })
            .collect())
    }

    #[instrument(level = "debug", skip(self, input))]
    pub fn create_user(&self, input: NewUser) -> ApplicationResult<UserAccount> {
        if input.email.trim().is_empty() {
            return Err(DomainError::EmptyField { field: "email" }.into());
        }
        let user = UserAccount {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            email: input.email,
            role: input.role,
            kind: input.kind,
            position: input.position,
            extension: input.extension,
            social_contact: input.social_contact,
            branch_id: input.branch_id,
            avatar: input.avatar,
            created_at: Utc::now(),
        };
        let row = encode(ResourceKind::Users, &user)?;
        self.store.insert(ResourceKind::Users, row)?;
        self.cache.invalidate_kind(ResourceKind::Users);
        debug!(id = %user.id, "user created");
        Ok(user)
    }

    #[instrument(level = "debug", skip(self, patch))]
    pub fn update_user(&self, id: &str, patch: UserPatch) -> ApplicationResult<UserAccount> {
        let mut user: UserAccount = fetch(self.store.as_ref(), ResourceKind::Users, id)?;

        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(role) = patch.role {
            user.role = role;
        }
        if let Some(position) = patch.position {
            user.position = Some(position);
        }
        if let Some(extension) = patch.extension {
            user.extension = Some(extension);
        }
        if let Some(social_contact) = patch.social_contact {
            user.social_contact = Some(social_contact);
        }
        if let Some(branch_id) = patch.branch_id {
            user.branch_id = Some(branch_id);
        }
        if let Some(avatar) = patch.avatar {
            user.avatar = Some(avatar);
        }

        let row = encode(ResourceKind::Users, &user)?;
        self.store.update(ResourceKind::Users, id, row)?;
        self.cache.invalidate_kind(ResourceKind::Users);
        Ok(user)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn delete_user(&self, id: &str) -> ApplicationResult<()> {
        self.store.delete(ResourceKind::Users, id)?;
        self.cache.invalidate_kind(ResourceKind::Users);
        Ok(())
    }
}
