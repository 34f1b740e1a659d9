//! Command execution: maps parsed arguments onto the services

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

use crate::application::services::{
    BranchPatch, CategoryPatch, CompanyFilter, CompanyPatch, DocumentFilter, EventFilter,
    EventPatch, NewBranch, NewCategory, NewCompany, NewDocument, NewEvent, NewNewsPost,
    NewProduct, NewSpecification, NewUser, NewsFilter, NewsPatch, ProductFilter, ProductPatch,
    UserFilter, UserPatch,
};
use crate::cli::args::{
    BranchCommands, CategoryCommands, Cli, Commands, CompanyCommands, ConfigCommands, DocCommands,
    EventCommands, NewsCommands, ProductCommands, SpecCommands, UserCommands,
};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let command = match &cli.command {
        Some(command) => command,
        None => return Ok(()),
    };

    // Completion generation is handled in main before services are built
    if let Commands::Completion { .. } = command {
        return Ok(());
    }

    let mut settings = Settings::load()?;
    if let Some(data_dir) = &cli.data_dir {
        settings.data_dir = data_dir.clone();
        settings.uploads_dir = data_dir.join("uploads");
    }
    debug!(data_dir = %settings.data_dir.display(), "settings loaded");
    let container = ServiceContainer::new(settings);

    match command {
        Commands::Category { command } => category_command(&container, command),
        Commands::Product { command } => product_command(&container, command),
        Commands::Company { command } => company_command(&container, command),
        Commands::Branch { command } => branch_command(&container, command),
        Commands::User { command } => user_command(&container, command),
        Commands::News { command } => news_command(&container, command),
        Commands::Event { command } => event_command(&container, command),
        Commands::Doc { command } => doc_command(&container, command),
        Commands::Config { command } => config_command(&container, command),
        Commands::Completion { .. } => Ok(()),
    }
}

#[instrument(level = "debug", skip(container))]
fn category_command(container: &ServiceContainer, command: &CategoryCommands) -> CliResult<()> {
    match command {
        CategoryCommands::Tree => {
            let forest = container.catalog.category_forest()?;
            if forest.is_empty() {
                output::info("no categories");
            } else {
                output::print_forest(&forest);
            }
            Ok(())
        }
        CategoryCommands::List => {
            for category in container.catalog.list_categories()? {
                let parent = category.parent_id.as_deref().unwrap_or("-");
                output::info(&format!(
                    "{}  {}  parent={}",
                    category.id, category.name, parent
                ));
            }
            Ok(())
        }
        CategoryCommands::Options => {
            for option in container.catalog.category_options()? {
                output::info(&format!("{}  {}", option.id, option.label));
            }
            Ok(())
        }
        CategoryCommands::Add {
            name,
            parent,
            description,
        } => {
            let category = container.catalog.create_category(NewCategory {
                name: name.clone(),
                parent_id: parent.clone(),
                description: description.clone(),
            })?;
            output::action("created", &format!("category {} ({})", category.name, category.id));
            Ok(())
        }
        CategoryCommands::Edit {
            id,
            name,
            parent,
            root,
            description,
        } => {
            let parent_id = if *root {
                Some(None)
            } else {
                parent.clone().map(Some)
            };
            let category = container.catalog.update_category(
                id,
                CategoryPatch {
                    name: name.clone(),
                    parent_id,
                    description: description.clone(),
                },
            )?;
            output::action("updated", &format!("category {} ({})", category.name, category.id));
            Ok(())
        }
        CategoryCommands::Rm { id } => {
            container.catalog.delete_category(id)?;
            output::action("deleted", &format!("category {id}"));
            Ok(())
        }
    }
}

#[instrument(level = "debug", skip(container))]
fn product_command(container: &ServiceContainer, command: &ProductCommands) -> CliResult<()> {
    match command {
        ProductCommands::List {
            search,
            category,
            company,
            status,
        } => {
            let products = container.catalog.list_products(&ProductFilter {
                search: search.clone(),
                category_id: category.clone(),
                company_id: company.clone(),
                status: *status,
            })?;
            for product in products {
                output::info(&format!(
                    "{}  {}  [{}]",
                    product.id, product.name, product.status
                ));
            }
            Ok(())
        }
        ProductCommands::Show { id } => {
            let product = container.catalog.get_product(id)?;
            output::header(&product.name);
            output::detail(&format!("id: {}", product.id));
            output::detail(&format!("status: {}", product.status));
            output::detail(&format!("category: {}", product.category_id));
            if let Some(subcategory) = &product.subcategory_id {
                output::detail(&format!("subcategory: {subcategory}"));
            }
            output::detail(&format!("company: {}", product.company_id));
            if let Some(description) = &product.description {
                output::detail(&format!("description: {description}"));
            }
            if !product.tags.is_empty() {
                output::detail(&format!("tags: {}", product.tags.join(", ")));
            }
            Ok(())
        }
        ProductCommands::Add {
            name,
            category,
            subcategory,
            company,
            author,
            description,
            status,
            strengths,
            weaknesses,
            processes,
            tags,
        } => {
            let product = container.catalog.create_product(NewProduct {
                name: name.clone(),
                category_id: category.clone(),
                subcategory_id: subcategory.clone(),
                company_id: company.clone(),
                description: description.clone(),
                status: *status,
                strengths: strengths.clone(),
                weaknesses: weaknesses.clone(),
                processes: processes.clone(),
                tags: tags.clone(),
                author: author.clone(),
            })?;
            output::action("created", &format!("product {} ({})", product.name, product.id));
            Ok(())
        }
        ProductCommands::Edit {
            id,
            name,
            category,
            subcategory,
            company,
            description,
            status,
            strengths,
            weaknesses,
            processes,
            tags,
        } => {
            let product = container.catalog.update_product(
                id,
                ProductPatch {
                    name: name.clone(),
                    category_id: category.clone(),
                    subcategory_id: subcategory.clone(),
                    company_id: company.clone(),
                    description: description.clone(),
                    status: *status,
                    strengths: strengths.clone(),
                    weaknesses: weaknesses.clone(),
                    processes: processes.clone(),
                    tags: if tags.is_empty() {
                        None
                    } else {
                        Some(tags.clone())
                    },
                },
            )?;
            output::action("updated", &format!("product {} ({})", product.name, product.id));
            Ok(())
        }
        ProductCommands::Rm { id } => {
            container.catalog.delete_product(id)?;
            output::action("deleted", &format!("product {id}"));
            Ok(())
        }
    }
}

#[instrument(level = "debug", skip(container))]
fn company_command(container: &ServiceContainer, command: &CompanyCommands) -> CliResult<()> {
    match command {
        CompanyCommands::List {
            search,
            classification,
        } => {
            let companies = container.directory.list_companies(&CompanyFilter {
                search: search.clone(),
                classification: classification.clone(),
            })?;
            for company in companies {
                let classification = company.classification.as_deref().unwrap_or("-");
                output::info(&format!(
                    "{}  {}  [{}]",
                    company.id, company.name, classification
                ));
            }
            Ok(())
        }
        CompanyCommands::Classifications => {
            for classification in container.directory.classifications()? {
                output::info(&classification);
            }
            Ok(())
        }
        CompanyCommands::Show { id } => {
            let company = container.directory.get_company(id)?;
            output::header(&company.name);
            output::detail(&format!("id: {}", company.id));
            if let Some(classification) = &company.classification {
                output::detail(&format!("classification: {classification}"));
            }
            if let Some(email) = &company.contact_email {
                output::detail(&format!("email: {email}"));
            }
            if let Some(website) = &company.website {
                output::detail(&format!("website: {website}"));
            }
            let specs = container.directory.list_specifications(id)?;
            if !specs.is_empty() {
                output::header("specifications");
                for spec in specs {
                    output::detail(&format!("{}  [{}] {}", spec.id, spec.category, spec.content));
                }
            }
            Ok(())
        }
        CompanyCommands::Add {
            name,
            classification,
            email,
            website,
            logo,
            agent_access_url,
        } => {
            let company = container.directory.create_company(NewCompany {
                name: name.clone(),
                classification: classification.clone(),
                contact_email: email.clone(),
                website: website.clone(),
                logo: logo.clone(),
                agent_access_url: agent_access_url.clone(),
            })?;
            output::action("created", &format!("company {} ({})", company.name, company.id));
            Ok(())
        }
        CompanyCommands::Edit {
            id,
            name,
            classification,
            email,
            website,
            logo,
            agent_access_url,
        } => {
            let company = container.directory.update_company(
                id,
                CompanyPatch {
                    name: name.clone(),
                    classification: classification.clone(),
                    contact_email: email.clone(),
                    website: website.clone(),
                    logo: logo.clone(),
                    agent_access_url: agent_access_url.clone(),
                },
            )?;
            output::action("updated", &format!("company {} ({})", company.name, company.id));
            Ok(())
        }
        CompanyCommands::Rm { id } => {
            container.directory.delete_company(id)?;
            output::action("deleted", &format!("company {id}"));
            Ok(())
        }
        CompanyCommands::Spec { command } => spec_command(container, command),
    }
}

fn spec_command(container: &ServiceContainer, command: &SpecCommands) -> CliResult<()> {
    match command {
        SpecCommands::List { company } => {
            for spec in container.directory.list_specifications(company)? {
                output::info(&format!("{}  [{}] {}", spec.id, spec.category, spec.content));
            }
            Ok(())
        }
        SpecCommands::Add {
            company,
            category,
            content,
        } => {
            let spec = container.directory.add_specification(NewSpecification {
                company_id: company.clone(),
                category: category.clone(),
                content: content.clone(),
            })?;
            output::action("created", &format!("specification {}", spec.id));
            Ok(())
        }
        SpecCommands::Rm { id } => {
            container.directory.delete_specification(id)?;
            output::action("deleted", &format!("specification {id}"));
            Ok(())
        }
    }
}

#[instrument(level = "debug", skip(container))]
fn branch_command(container: &ServiceContainer, command: &BranchCommands) -> CliResult<()> {
    match command {
        BranchCommands::List { search } => {
            for branch in container.directory.list_branches(search.as_deref())? {
                output::info(&format!("{}  {}  {}", branch.id, branch.name, branch.city));
            }
            Ok(())
        }
        BranchCommands::Add {
            name,
            address,
            city,
            province,
            postal_code,
            contact,
            email,
            phone,
            website,
        } => {
            let branch = container.directory.create_branch(NewBranch {
                name: name.clone(),
                address: address.clone(),
                city: city.clone(),
                province: province.clone(),
                postal_code: postal_code.clone(),
                contact_person: contact.clone(),
                email: email.clone(),
                phone: phone.clone(),
                website: website.clone(),
            })?;
            output::action("created", &format!("branch {} ({})", branch.name, branch.id));
            Ok(())
        }
        BranchCommands::Edit {
            id,
            name,
            address,
            city,
            province,
            postal_code,
            contact,
            email,
            phone,
            website,
        } => {
            let branch = container.directory.update_branch(
                id,
                BranchPatch {
                    name: name.clone(),
                    address: address.clone(),
                    city: city.clone(),
                    province: province.clone(),
                    postal_code: postal_code.clone(),
                    contact_person: contact.clone(),
                    email: email.clone(),
                    phone: phone.clone(),
                    website: website.clone(),
                },
            )?;
            output::action("updated", &format!("branch {} ({})", branch.name, branch.id));
            Ok(())
        }
        BranchCommands::Rm { id } => {
            container.directory.delete_branch(id)?;
            output::action("deleted", &format!("branch {id}"));
            Ok(())
        }
    }
}

#[instrument(level = "debug", skip(container))]
fn user_command(container: &ServiceContainer, command: &UserCommands) -> CliResult<()> {
    match command {
        UserCommands::List {
            search,
            role,
            branch,
        } => {
            let users = container.directory.list_users(&UserFilter {
                search: search.clone(),
                role: role.clone(),
                branch_id: branch.clone(),
            })?;
            for user in users {
                output::info(&format!(
                    "{}  {}  <{}>  [{}]",
                    user.id, user.name, user.email, user.role
                ));
            }
            Ok(())
        }
        UserCommands::Add {
            name,
            email,
            role,
            kind,
            position,
            extension,
            social_contact,
            branch,
            avatar,
        } => {
            let user = container.directory.create_user(NewUser {
                name: name.clone(),
                email: email.clone(),
                role: role.clone(),
                kind: kind.clone(),
                position: position.clone(),
                extension: extension.clone(),
                social_contact: social_contact.clone(),
                branch_id: branch.clone(),
                avatar: avatar.clone(),
            })?;
            output::action("created", &format!("user {} ({})", user.name, user.id));
            Ok(())
        }
        UserCommands::Edit {
            id,
            name,
            email,
            role,
            position,
            extension,
            social_contact,
            branch,
            avatar,
        } => {
            let user = container.directory.update_user(
                id,
                UserPatch {
                    name: name.clone(),
                    email: email.clone(),
                    role: role.clone(),
                    position: position.clone(),
                    extension: extension.clone(),
                    social_contact: social_contact.clone(),
                    branch_id: branch.clone(),
                    avatar: avatar.clone(),
                },
            )?;
            output::action("updated", &format!("user {} ({})", user.name, user.id));
            Ok(())
        }
        UserCommands::Rm { id } => {
            container.directory.delete_user(id)?;
            output::action("deleted", &format!("user {id}"));
            Ok(())
        }
    }
}

#[instrument(level = "debug", skip(container))]
fn news_command(container: &ServiceContainer, command: &NewsCommands) -> CliResult<()> {
    match command {
        NewsCommands::List {
            search,
            category,
            company,
            featured,
        } => {
            let posts = container.content.list_news(&NewsFilter {
                search: search.clone(),
                category: category.clone(),
                company_id: company.clone(),
                featured: if *featured { Some(true) } else { None },
            })?;
            for post in posts {
                let marker = if post.featured { "*" } else { " " };
                output::info(&format!(
                    "{} {}  {}  ({})",
                    marker,
                    post.id,
                    post.title,
                    post.published_at.format("%Y-%m-%d")
                ));
            }
            Ok(())
        }
        NewsCommands::Add {
            title,
            content,
            category,
            author,
            excerpt,
            company,
            cover_image,
            featured,
            tags,
        } => {
            let post = container.content.create_news(NewNewsPost {
                title: title.clone(),
                content: content.clone(),
                excerpt: excerpt.clone(),
                category: category.clone(),
                company_id: company.clone(),
                cover_image: cover_image.clone(),
                featured: *featured,
                tags: tags.clone(),
                author: author.clone(),
            })?;
            output::action("published", &format!("news {} ({})", post.title, post.id));
            Ok(())
        }
        NewsCommands::Edit {
            id,
            title,
            content,
            excerpt,
            category,
            cover_image,
            featured,
            tags,
        } => {
            let post = container.content.update_news(
                id,
                NewsPatch {
                    title: title.clone(),
                    content: content.clone(),
                    excerpt: excerpt.clone(),
                    category: category.clone(),
                    cover_image: cover_image.clone(),
                    featured: *featured,
                    tags: if tags.is_empty() {
                        None
                    } else {
                        Some(tags.clone())
                    },
                },
            )?;
            output::action("updated", &format!("news {} ({})", post.title, post.id));
            Ok(())
        }
        NewsCommands::Rm { id } => {
            container.content.delete_news(id)?;
            output::action("deleted", &format!("news {id}"));
            Ok(())
        }
    }
}

#[instrument(level = "debug", skip(container))]
fn event_command(container: &ServiceContainer, command: &EventCommands) -> CliResult<()> {
    match command {
        EventCommands::List { category, from, to } => {
            let events = container.content.list_events(&EventFilter {
                category: category.clone(),
                from: *from,
                to: *to,
            })?;
            for event in events {
                output::info(&format!(
                    "{}  {}  {} .. {}",
                    event.id,
                    event.title,
                    format_date(&event.start_date),
                    format_date(&event.end_date)
                ));
            }
            Ok(())
        }
        EventCommands::Add {
            title,
            category,
            start,
            end,
            user,
            description,
            location,
        } => {
            let event = container.content.create_event(NewEvent {
                title: title.clone(),
                description: description.clone(),
                category: category.clone(),
                location: location.clone(),
                start_date: *start,
                end_date: *end,
                user_id: user.clone(),
            })?;
            output::action("created", &format!("event {} ({})", event.title, event.id));
            Ok(())
        }
        EventCommands::Edit {
            id,
            title,
            description,
            category,
            location,
            start,
            end,
        } => {
            let event = container.content.update_event(
                id,
                EventPatch {
                    title: title.clone(),
                    description: description.clone(),
                    category: category.clone(),
                    location: location.clone(),
                    start_date: *start,
                    end_date: *end,
                },
            )?;
            output::action("updated", &format!("event {} ({})", event.title, event.id));
            Ok(())
        }
        EventCommands::Rm { id } => {
            container.content.delete_event(id)?;
            output::action("deleted", &format!("event {id}"));
            Ok(())
        }
    }
}

#[instrument(level = "debug", skip(container))]
fn doc_command(container: &ServiceContainer, command: &DocCommands) -> CliResult<()> {
    match command {
        DocCommands::List {
            search,
            category,
            company,
            product,
        } => {
            let documents = container.documents.list_documents(&DocumentFilter {
                search: search.clone(),
                category_id: category.clone(),
                company_id: company.clone(),
                product_id: product.clone(),
            })?;
            for document in documents {
                output::info(&format!(
                    "{}  {}  {} ({} bytes)",
                    document.id, document.title, document.file_type, document.file_size
                ));
            }
            Ok(())
        }
        DocCommands::Add {
            file,
            category,
            uploader,
            title,
            description,
            company,
            product,
            tags,
        } => {
            let file_name = file_name_of(file)?;
            let bytes = fs::read(file).map_err(|e| {
                CliError::Infra(InfraError::io(format!("reading {}", file.display()), e))
            })?;
            let document = container.documents.create_document(NewDocument {
                title: title.clone().unwrap_or_else(|| file_name.clone()),
                description: description.clone(),
                category_id: category.clone(),
                company_id: company.clone(),
                product_id: product.clone(),
                product_category_id: None,
                product_subcategory_id: None,
                tags: tags.clone(),
                uploaded_by: uploader.clone(),
                file_name,
                bytes,
            })?;
            output::action(
                "uploaded",
                &format!("document {} ({})", document.title, document.id),
            );
            output::detail(&format!("stored at {}", document.file_url));
            Ok(())
        }
        DocCommands::Rm { id } => {
            container.documents.delete_document(id)?;
            output::action("deleted", &format!("document {id}"));
            Ok(())
        }
    }
}

fn config_command(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let body = toml::to_string_pretty(container.settings.as_ref()).map_err(|e| {
                CliError::Usage(format!("cannot render settings: {e}"))
            })?;
            output::info(&body);
            Ok(())
        }
        ConfigCommands::Init => {
            let path = Settings::global_config_path()
                .ok_or_else(|| CliError::Usage("cannot determine config directory".to_string()))?;
            if path.exists() {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|e| {
                    CliError::Infra(InfraError::io(format!("creating {}", parent.display()), e))
                })?;
            }
            let template = Settings::template()?;
            fs::write(&path, template).map_err(|e| {
                CliError::Infra(InfraError::io(format!("writing {}", path.display()), e))
            })?;
            output::success(&format!("created {}", path.display()));
            Ok(())
        }
        ConfigCommands::Path => {
            if let Some(path) = Settings::global_config_path() {
                output::info(&format!("config: {}", path.display()));
            }
            output::info(&format!(
                "data:   {}",
                container.settings.data_dir.display()
            ));
            output::info(&format!(
                "uploads: {}",
                container.settings.uploads_dir.display()
            ));
            Ok(())
        }
    }
}

fn format_date(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M").to_string()
}

fn file_name_of(path: &Path) -> CliResult<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(String::from)
        .ok_or_else(|| CliError::InvalidArgs(format!("not a file path: {}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn given_plain_file_path_when_extracting_name_then_it_is_returned() {
        let name = file_name_of(&PathBuf::from("/tmp/brochure.pdf")).unwrap();
        assert_eq!(name, "brochure.pdf");
    }
}
