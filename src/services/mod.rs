// Application services
// Thin coordinators: load prerequisites, authorize, validate, persist

pub mod company_service;
pub mod contract_service;
pub mod dashboard_service;
pub mod user_service;
pub mod vacation_service;

pub use company_service::{CompanyInput, CompanyService};
pub use contract_service::ContractService;
pub use dashboard_service::{DashboardService, DashboardStats};
pub use user_service::{LoginOutcome, NewUser, UserChanges, UserService};
pub use vacation_service::VacationService;

use std::sync::Arc;

use crate::auth::jwt::TokenCodec;
use crate::auth::password::CredentialHasher;
use crate::infrastructure::repositories::Repositories;

/// Every application service, wired over one set of repositories
#[derive(Clone)]
pub struct Services {
    pub companies: Arc<CompanyService>,
    pub users: Arc<UserService>,
    pub contracts: Arc<ContractService>,
    pub vacations: Arc<VacationService>,
    pub dashboard: Arc<DashboardService>,
}

impl Services {
    pub fn new(
        repos: Repositories,
        hasher: Arc<dyn CredentialHasher>,
        tokens: Arc<TokenCodec>,
    ) -> Self {
        Self {
            companies: Arc::new(CompanyService::new(repos.companies.clone())),
            users: Arc::new(UserService::new(
                repos.users.clone(),
                repos.companies.clone(),
                hasher,
                tokens,
            )),
            contracts: Arc::new(ContractService::new(
                repos.contracts.clone(),
                repos.users.clone(),
            )),
            vacations: Arc::new(VacationService::new(
                repos.vacations.clone(),
                repos.users.clone(),
            )),
            dashboard: Arc::new(DashboardService::new(
                repos.users,
                repos.companies,
                repos.contracts,
            )),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::auth::access::Caller;
    use crate::auth::jwt::TokenConfig;
    use crate::auth::password::BcryptHasher;
    use crate::domain::company::Company;
    use crate::domain::user::{Role, User};

    pub(crate) const TEST_SECRET: &str = "service-tests-signing-key-0123456789";

    /// Services over a fresh in-memory store, with cheap hashing
    pub(crate) fn services() -> Services {
        Services::new(
            Repositories::in_memory(),
            Arc::new(BcryptHasher::new(4)),
            Arc::new(TokenCodec::new(&TokenConfig::new(TEST_SECRET))),
        )
    }

    pub(crate) fn new_user(name: &str, email: &str, role: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password: "secret".to_string(),
            role: role.to_string(),
        }
    }

    /// A company with its bootstrap admin and one employee
    pub(crate) struct Fixture {
        pub services: Services,
        pub company: Company,
        pub admin: User,
        pub employee: User,
    }

    impl Fixture {
        pub(crate) async fn new() -> Self {
            let services = services();
            let company = services
                .companies
                .create(CompanyInput {
                    name: "Acme".to_string(),
                    tax_id: "B-00000001".to_string(),
                })
                .await
                .unwrap();
            let admin = services
                .users
                .create(None, company.id(), new_user("Root", "root@acme.test", "ADMIN"))
                .await
                .unwrap();
            let admin_caller = Caller::new(admin.id(), Role::Admin);
            let employee = services
                .users
                .create(
                    Some(&admin_caller),
                    company.id(),
                    new_user("Ada", "ada@acme.test", "EMPLOYEE"),
                )
                .await
                .unwrap();

            Self {
                services,
                company,
                admin,
                employee,
            }
        }

        pub(crate) fn admin_caller(&self) -> Caller {
            Caller::new(self.admin.id(), self.admin.role())
        }

        pub(crate) fn employee_caller(&self) -> Caller {
            Caller::new(self.employee.id(), self.employee.role())
        }
    }
}
