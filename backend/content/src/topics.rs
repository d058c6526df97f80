/// A canned paragraph keyed by a filename fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topic {
    pub key: &'static str,
    pub text: &'static str,
}

pub const MACHINE_LEARNING: Topic = Topic {
    key: "machine_learning",
    text: "Machine learning is a subset of artificial intelligence that enables computers to learn and make decisions from data without being explicitly programmed. Key concepts include supervised learning, unsupervised learning, and reinforcement learning. Common algorithms include linear regression, decision trees, neural networks, and support vector machines.",
};

pub const BIOLOGY: Topic = Topic {
    key: "biology",
    text: "Photosynthesis is the process by which plants convert sunlight, carbon dioxide, and water into glucose and oxygen. This process occurs in chloroplasts and involves two main stages: light-dependent reactions and the Calvin cycle. The overall equation is 6CO2 + 6H2O + light energy → C6H12O6 + 6O2.",
};

pub const HISTORY: Topic = Topic {
    key: "history",
    text: "The Industrial Revolution began in Britain in the late 18th century and transformed society from agricultural to manufacturing-based economies. Key innovations included the steam engine, textile machinery, and iron production techniques. This period led to urbanization, improved transportation, and significant social changes.",
};

pub const PHYSICS: Topic = Topic {
    key: "physics",
    text: "Newton's laws of motion describe the relationship between forces and motion. The first law states that objects at rest stay at rest unless acted upon by a force. The second law defines force as mass times acceleration (F=ma). The third law states that for every action, there is an equal and opposite reaction.",
};

/// Match order matters: the first key found in the filename wins.
pub const TOPICS: [Topic; 4] = [MACHINE_LEARNING, BIOLOGY, HISTORY, PHYSICS];

pub const DEFAULT_TOPIC: Topic = MACHINE_LEARNING;
