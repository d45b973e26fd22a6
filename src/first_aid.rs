//! Static first-aid kit contents shown in the togglable panel

pub const FIRST_AID_KIT: [&str; 15] = [
    "Adhesive bandages (various sizes)",
    "Sterile gauze pads",
    "Adhesive tape",
    "Elastic bandage",
    "Triangular bandage",
    "Antiseptic wipes",
    "Antibiotic ointment",
    "Pain relief medication",
    "Scissors",
    "Tweezers",
    "Disposable gloves",
    "Emergency blanket",
    "First aid manual",
    "Saline solution",
    "Digital thermometer",
];

/// Banner shown above the emergency page
pub const EMERGENCY_SERVICES_WARNING: &str =
    "For life-threatening emergencies, immediately call emergency services (911/112)";

/// Footer disclaimer shown on every page
pub const MEDICAL_DISCLAIMER: &str = "MediAI Assistant is designed to provide preliminary medical \
     information and emergency guidance. For accurate diagnosis and treatment, always consult \
     qualified healthcare professionals.";
