//! Instruction text sent as the system message of every label request.

/// Closed vocabulary the model may answer with.
pub const FEATURE_CATEGORIES: [&str; 18] = [
    "Multi-lane highway or freeway",
    "Local or residential road",
    "Railroad track",
    "Other transportation infrastructure",
    "Physical barrier (includes guardrail, bollard, fencing, or wall)",
    "Street sign indicating no passage",
    "Vegetation",
    "Residential buildings and property",
    "Community buildings and property",
    "Industrial buildings and property",
    "Other buildings and property",
    "Recreational areas",
    "Parking facility",
    "Cemeteries",
    "Industrial area that is not a building",
    "Undeveloped land",
    "Water body or waterway",
    "Topographical feature",
];

const TASK_INTRO: &str = "You will be provided with three images of the same location. \
The first image is a satellite image and the second and third images are street-level images. \
Follow these instructions in order:\n\
1. For the satellite image, list one or more built environment features that specifically \
overlap with the red line in the center of the image only if the feature is in this list:\n";

const TASK_OUTRO: &str = "Do not list features that do not overlap with the red line.\n\
2. For the street-level images, identify any features from the list that you did not identify \
in the satellite image, if there are any.\n\
Summarize unique features across the three images in one line of text with each feature \
separated by a comma. You do not need to provide summaries of each image.";

pub fn build_instruction(categories: &[&str]) -> String {
    let mut text = String::from(TASK_INTRO);
    for category in categories {
        text.push_str("- ");
        text.push_str(category);
        text.push('\n');
    }
    text.push_str(TASK_OUTRO);
    text
}

pub fn default_instruction() -> String {
    build_instruction(&FEATURE_CATEGORIES)
}
