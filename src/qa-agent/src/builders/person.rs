//! Person builder shared by account holders and team members

use portal_qa_shared::Person;

use crate::generator;

/// Field overrides for one [`Person`]; unset fields are generated on build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonBuilder {
    email: Option<String>,
    password: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    job_title: Option<String>,
    phone_number: Option<String>,
    user_type: Option<i32>,
    role: Option<i32>,
    partner_consumer_type: Option<i32>,
}

impl PersonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    pub fn job_title(mut self, job_title: impl Into<String>) -> Self {
        self.job_title = Some(job_title.into());
        self
    }

    pub fn phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    pub fn user_type(mut self, user_type: i32) -> Self {
        self.user_type = Some(user_type);
        self
    }

    pub fn role(mut self, role: i32) -> Self {
        self.role = Some(role);
        self
    }

    pub fn partner_consumer_type(mut self, partner_consumer_type: i32) -> Self {
        self.partner_consumer_type = Some(partner_consumer_type);
        self
    }

    /// Overrides set on `other` replace the ones set here
    pub fn merge(mut self, other: PersonBuilder) -> Self {
        self.email = other.email.or(self.email);
        self.password = other.password.or(self.password);
        self.first_name = other.first_name.or(self.first_name);
        self.last_name = other.last_name.or(self.last_name);
        self.job_title = other.job_title.or(self.job_title);
        self.phone_number = other.phone_number.or(self.phone_number);
        self.user_type = other.user_type.or(self.user_type);
        self.role = other.role.or(self.role);
        self.partner_consumer_type = other.partner_consumer_type.or(self.partner_consumer_type);
        self
    }

    /// Resolve every unset field. The email is derived from the first name,
    /// so an overridden first name shows up in the generated address.
    pub fn build(&self) -> Person {
        let first_name = self.first_name.clone().unwrap_or_else(generator::first_name);
        let email = self
            .email
            .clone()
            .unwrap_or_else(|| generator::email(&first_name));

        Person {
            email,
            password: Some(self.password.clone().unwrap_or_else(generator::password)),
            last_name: self.last_name.clone().unwrap_or_else(generator::last_name),
            job_title: self.job_title.clone().unwrap_or_else(generator::job_title),
            phone_number: self
                .phone_number
                .clone()
                .unwrap_or_else(generator::phone_number),
            user_type: self.user_type,
            role: self.role,
            partner_consumer_type: self.partner_consumer_type,
            first_name,
        }
    }
}
