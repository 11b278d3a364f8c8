use std::collections::HashMap;

use super::types::{Company, Contact, Person};

/// Left outer join of people onto companies by company name.
///
/// Keeps the order of `people`. A person whose company name matches several
/// company rows appears once per match; a person with no match appears once
/// with `company: None`.
pub fn join_people_with_companies(people: &[Person], companies: &[Company]) -> Vec<Contact> {
    let mut by_name: HashMap<&str, Vec<&Company>> = HashMap::new();
    for company in companies {
        by_name.entry(company.name.as_str()).or_default().push(company);
    }

    let mut contacts = Vec::with_capacity(people.len());

    for person in people {
        let matches = person
            .company
            .as_deref()
            .and_then(|name| by_name.get(name));

        match matches {
            Some(companies) => {
                for company in companies {
                    contacts.push(Contact {
                        person: person.clone(),
                        company: Some((*company).clone()),
                    });
                }
            }
            None => contacts.push(Contact {
                person: person.clone(),
                company: None,
            }),
        }
    }

    contacts
}
