use dioxus::prelude::*;

/// Sprite mood, driven by the last care action and reverted to idle on a
/// short timer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PetMood {
    #[default]
    Idle,
    Eating,
    Excited,
}

impl PetMood {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Eating => "Eating",
            Self::Excited => "Excited",
        }
    }

    fn sprite(self) -> &'static str {
        match self {
            Self::Idle => "\u{1F431}",
            Self::Eating => "\u{1F63A}",
            Self::Excited => "\u{1F63B}",
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct PetViewProps {
    pub mood: PetMood,
    /// 0..=100
    pub happiness: u32,
}

#[component]
pub fn PetView(props: PetViewProps) -> Element {
    let sprite = props.mood.sprite();
    let mood_label = props.mood.label();
    let happiness = props.happiness;

    rsx! {
        div { class: "flex flex-col items-center justify-center",
            // Pet sprite
            div { class: "text-8xl mb-4", style: "image-rendering: pixelated;",
                "{sprite}"
            }
            p { class: "font-nunito text-sm text-card-foreground mb-6", "{mood_label}" }

            // Happiness meter
            div { class: "w-full",
                div { class: "flex justify-between items-center mb-2",
                    span { class: "font-nunito text-sm font-semibold text-card-foreground", "Happiness" }
                    span { class: "font-nunito text-sm text-card-foreground", "{happiness}%" }
                }
                div { class: "retro-progress",
                    div {
                        class: "retro-progress-fill transition-all duration-500",
                        style: "width: {happiness}%",
                    }
                }
            }
        }
    }
}
