//! Screen identifiers with their header titles and contextual help text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Every screen in the questionnaire and results flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScreenId {
    Home,
    Location,
    InstitutionType,
    HelpForWho,
    InfoGender,
    OtherGender,
    InfoAge,
    PersonType,
    NeedsA,
    NeedsB,
    NeedsC,
    NeedsD,
    OrganisationsList,
    CompaniesOrganisationsList,
    SdgOrganisationsList,
    OrganisationDetails,
}

const ROUTES: [(&str, ScreenId); 16] = [
    ("HomeScreen", ScreenId::Home),
    ("LocationScreen", ScreenId::Location),
    ("InstitutionType", ScreenId::InstitutionType),
    ("HelpForWho", ScreenId::HelpForWho),
    ("InfoGender", ScreenId::InfoGender),
    ("OtherGender", ScreenId::OtherGender),
    ("InfoAge", ScreenId::InfoAge),
    ("PersonType", ScreenId::PersonType),
    ("NeedsScreenA", ScreenId::NeedsA),
    ("NeedsScreenB", ScreenId::NeedsB),
    ("NeedsScreenC", ScreenId::NeedsC),
    ("NeedsScreenD", ScreenId::NeedsD),
    ("OrganisationsListScreen", ScreenId::OrganisationsList),
    ("CompaniesOrganisationsList", ScreenId::CompaniesOrganisationsList),
    ("SdgOrganisationsList", ScreenId::SdgOrganisationsList),
    ("OrganisationDetailsScreen", ScreenId::OrganisationDetails),
];

const DEFAULT_PROMPT: &str = "an option";

const RESULTS_HELP: &str = "This is the list of organisations identified based on your search. \
If you can't find the help you need, you can change the Region, Age and Gender options to search again.";

const COMPANIES_RESULTS_HELP: &str = "This is the list of organisations identified based on your search. \
If you can't find the help you need, you can change the Region option to search again.";

const DETAILS_HELP: &str = "Here you can find all the details for the organisation selected.";

impl ScreenId {
    pub fn from_route_name(route: &str) -> Option<ScreenId> {
        ROUTES
            .iter()
            .find(|(name, _)| *name == route)
            .map(|(_, screen)| *screen)
    }

    pub fn route_name(&self) -> &'static str {
        ROUTES
            .iter()
            .find(|(_, screen)| screen == self)
            .map(|(name, _)| *name)
            .unwrap_or("Unknown")
    }

    pub fn header_title(&self) -> &'static str {
        match self {
            ScreenId::Home => "Dots.",
            ScreenId::Location => "Select a region",
            ScreenId::InstitutionType => "Select a person type",
            ScreenId::HelpForWho => "Select for who",
            ScreenId::InfoGender => "Select a gender",
            ScreenId::OtherGender => "Select or specify",
            ScreenId::InfoAge => "Select an age",
            ScreenId::PersonType => "Select current situation",
            ScreenId::NeedsA | ScreenId::NeedsB | ScreenId::NeedsC | ScreenId::NeedsD => {
                "Select a topic"
            }
            ScreenId::OrganisationsList | ScreenId::CompaniesOrganisationsList => "Your results",
            ScreenId::SdgOrganisationsList => "The goal results",
            ScreenId::OrganisationDetails => "Organisation details",
        }
    }

    /// What the user is asked to pick on a questionnaire screen
    fn prompt(&self) -> &'static str {
        match self {
            ScreenId::Location => "a region",
            ScreenId::InfoGender => "a gender",
            ScreenId::OtherGender => "or specify a",
            ScreenId::InfoAge => "an age range",
            ScreenId::NeedsA => "an area of interest",
            ScreenId::NeedsB | ScreenId::NeedsC => "a subtopic",
            _ => DEFAULT_PROMPT,
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.route_name())
    }
}

/// Help text shown from a screen's header; `None` is an unrecognised route
pub fn help_message(screen: Option<ScreenId>) -> String {
    match screen {
        Some(ScreenId::OrganisationsList) => RESULTS_HELP.to_string(),
        Some(ScreenId::CompaniesOrganisationsList) => COMPANIES_RESULTS_HELP.to_string(),
        Some(ScreenId::OrganisationDetails) => DETAILS_HELP.to_string(),
        Some(screen) => selection_prompt(screen.prompt()),
        None => selection_prompt(DEFAULT_PROMPT),
    }
}

/// Help text for a raw route name
pub fn help_message_for_route(route: &str) -> String {
    help_message(ScreenId::from_route_name(route))
}

fn selection_prompt(prompt: &str) -> String {
    format!(
        "Please select {}. This will help show only relevant organisations.",
        prompt
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_names_round_trip() {
        for (name, screen) in ROUTES {
            assert_eq!(ScreenId::from_route_name(name), Some(screen));
            assert_eq!(screen.route_name(), name);
        }
        assert_eq!(ScreenId::from_route_name("Settings"), None);
    }

    #[test]
    fn test_questionnaire_help_uses_screen_prompt() {
        assert_eq!(
            help_message(Some(ScreenId::Location)),
            "Please select a region. This will help show only relevant organisations."
        );
        assert!(help_message(Some(ScreenId::NeedsC)).contains("a subtopic"));
    }

    #[test]
    fn test_results_and_details_have_own_messages() {
        assert!(help_message(Some(ScreenId::OrganisationsList)).contains("Region, Age and Gender"));
        assert!(help_message(Some(ScreenId::CompaniesOrganisationsList)).contains("Region option"));
        assert_eq!(help_message(Some(ScreenId::OrganisationDetails)), DETAILS_HELP);
    }

    #[test]
    fn test_unknown_and_unlisted_screens_fall_back() {
        let fallback = "Please select an option. This will help show only relevant organisations.";
        assert_eq!(help_message_for_route("NoSuchScreen"), fallback);
        assert_eq!(help_message(Some(ScreenId::PersonType)), fallback);
        assert_eq!(help_message(Some(ScreenId::NeedsD)), fallback);
    }

    #[test]
    fn test_header_titles() {
        assert_eq!(ScreenId::Home.header_title(), "Dots.");
        assert_eq!(ScreenId::SdgOrganisationsList.header_title(), "The goal results");
    }
}
