//! Multi-step, single-choice questionnaire that seeds the initial keyword selection.

use tracing::{debug, info};

use crate::constants::AREA_OF_SUPPORT_SECTION;
use crate::error::{FinderError, Result};
use crate::screens::{help_message, ScreenId};
use crate::selection::SelectedKeywords;
use crate::taxonomy::{SectionContent, Taxonomy};

/// One screen of the questionnaire and the options it offers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionStep {
    pub screen: ScreenId,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Questionnaire {
    steps: Vec<QuestionStep>,
}

impl Questionnaire {
    pub fn new(steps: Vec<QuestionStep>) -> Self {
        Self { steps }
    }

    /// Region, gender, age, situation, then area of support.
    ///
    /// Sections missing from the taxonomy are left out of the flow.
    pub fn from_taxonomy(taxonomy: &Taxonomy) -> Self {
        let plan = [
            (ScreenId::Location, "Location"),
            (ScreenId::InfoGender, "Gender"),
            (ScreenId::InfoAge, "Age Group"),
            (ScreenId::PersonType, "People to Support"),
            (ScreenId::NeedsA, AREA_OF_SUPPORT_SECTION),
        ];

        let steps = plan
            .into_iter()
            .filter_map(|(screen, title)| {
                let section = taxonomy.section(title)?;
                let options: Vec<String> = match &section.content {
                    SectionContent::Keywords { keywords } => keywords.clone(),
                    SectionContent::Categories { categories } => {
                        categories.iter().map(|c| c.title.clone()).collect()
                    }
                };
                (!options.is_empty()).then_some(QuestionStep { screen, options })
            })
            .collect();

        Self { steps }
    }

    pub fn steps(&self) -> &[QuestionStep] {
        &self.steps
    }

    pub fn start(&self) -> QuestionnaireSession<'_> {
        QuestionnaireSession {
            questionnaire: self,
            current: 0,
            pending: None,
            answers: Vec::new(),
        }
    }
}

/// Progress through a questionnaire
#[derive(Debug, Clone)]
pub struct QuestionnaireSession<'a> {
    questionnaire: &'a Questionnaire,
    current: usize,
    pending: Option<usize>,
    answers: Vec<String>,
}

impl<'a> QuestionnaireSession<'a> {
    pub fn current_step(&self) -> Option<&'a QuestionStep> {
        self.questionnaire.steps.get(self.current)
    }

    /// Highlight an option on the current step, replacing any earlier choice
    pub fn select(&mut self, index: usize) -> Result<()> {
        let Some(step) = self.current_step() else {
            return Err(FinderError::InvalidAction {
                input: index.to_string(),
                reason: "questionnaire is already complete".to_string(),
            });
        };

        if index >= step.options.len() {
            return Err(FinderError::InvalidOption {
                screen: step.screen,
                index,
            });
        }

        debug!(screen = %step.screen, option = %step.options[index], "Option selected");
        self.pending = Some(index);
        Ok(())
    }

    pub fn selected(&self) -> Option<&'a str> {
        let step = self.current_step()?;
        self.pending.map(|index| step.options[index].as_str())
    }

    /// Record the highlighted option and move on; fails with the screen's help text if nothing is selected
    pub fn advance(&mut self) -> Result<()> {
        let Some(step) = self.current_step() else {
            return Ok(());
        };

        let Some(index) = self.pending.take() else {
            return Err(FinderError::NoOptionSelected {
                screen: step.screen,
                message: help_message(Some(step.screen)),
            });
        };

        self.answers.push(step.options[index].clone());
        self.current += 1;

        if self.is_complete() {
            info!(answers = self.answers.len(), "Questionnaire completed");
        }
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.questionnaire.steps.len()
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    /// The keywords handed to the filter screen
    pub fn into_selection(self) -> SelectedKeywords {
        self.answers.into_iter().collect()
    }
}
