//! Built-in response table for the researcher homepage
//!
//! Order matters: earlier rules win when an input mentions several topics.

/// A rule as written in source, before case-folding
pub(super) struct RuleDef {
    pub triggers: &'static [&'static str],
    pub response: &'static str,
}

/// Greeting revealed once per session before any visitor input
pub const WELCOME_MESSAGE: &str = "Welcome to Zikai Zhang's homepage! 👋\n\nI'm an AI assistant that can help you learn about Zikai's research in Federated Learning, AI Safety, and Computer Vision.\n\nFeel free to ask me anything about his work, publications, or background!";

pub(super) const FALLBACK_RESPONSE: &str = "That's an interesting question! While I specialize in information about Zikai's research in Federated Learning, AI Safety, and Computer Vision, I'd be happy to help you explore his work.\n\nYou might want to ask about:\n• His research areas and recent publications\n• His educational background and experience\n• How to contact him\n• Specific topics like federated learning or AI safety\n\nWhat would you like to know more about?";

pub(super) const BUILTIN_RULES: &[RuleDef] = &[
    // Research areas
    RuleDef {
        triggers: &["federated", "federation"],
        response: "Federated Learning is a distributed machine learning approach where multiple clients train a shared model while keeping their data local. Zikai's research focuses on:\n\n• Efficient LoRA allocation for heterogeneous clients\n• Foundation model fine-tuning in federated settings\n• Optimizing communication and computation efficiency\n\nHis recent work includes \"Fed-HeLLo\" which addresses efficient federated fine-tuning with heterogeneous LoRA allocation.",
    },
    RuleDef {
        triggers: &["ai safety", "safety"],
        response: "AI Safety is a crucial area of Zikai's research, focusing on:\n\n• Detecting backdoor attacks in federated learning\n• Developing robust defense mechanisms\n• Ensuring AI systems are secure and reliable\n\nHis work on \"Detecting Backdoor Attacks in Federated Learning via Direction Alignment Inspection\" (CVPR 2025) demonstrates innovative approaches to identifying malicious behavior in distributed learning systems.",
    },
    RuleDef {
        triggers: &["computer vision", "vision"],
        response: "Computer Vision applications in Zikai's research include:\n\n• Smart grid monitoring and optimization\n• Cyber-physical systems analysis\n• Pattern recognition for infrastructure\n\nHis survey paper \"Federated Learning for Smart Grid: A Survey on Applications and Potential Vulnerabilities\" (ACM TCPS 2025) explores how computer vision and federated learning can be applied to smart grid systems.",
    },
    // Publications
    RuleDef {
        triggers: &["publication", "paper", "research"],
        response: "Zikai has several recent publications in top-tier venues:\n\n📄 **ACM TCPS 2025**: \"Federated Learning for Smart Grid: A Survey on Applications and Potential Vulnerabilities\"\n📄 **IEEE TNNLS 2025**: \"Fed-HeLLo: Efficient Federated Foundation Model Fine-Tuning with Heterogeneous LoRA Allocation\"\n📄 **CVPR 2025**: \"Detecting Backdoor Attacks in Federated Learning via Direction Alignment Inspection\"\n\n📝 **Recent Preprints**:\n• \"FlowerTune: A Cross-Domain Benchmark for Federated Fine-Tuning of Large Language Models\" (2025)\n• \"Fed-pilot: Optimizing LoRA Allocation for Efficient Federated Fine-Tuning with Heterogeneous Clients\" (2024)\n\nHis work spans federated learning optimization, AI safety, and computer vision applications.",
    },
    RuleDef {
        triggers: &["news", "update", "recent"],
        response: "Recent updates from Zikai's research:\n\n🆕 **Latest News (2025)**:\n• New publication accepted at ACM TCPS 2025!\n• IEEE TNNLS paper on Fed-HeLLo published!\n• CVPR 2025 paper on backdoor detection accepted!\n• FlowerTune preprint on federated fine-tuning released!\n• Fed-pilot preprint on LoRA allocation published!\n\nHis research is actively contributing to the fields of federated learning and AI safety.",
    },
    RuleDef {
        triggers: &["preprint", "draft"],
        response: "Zikai's recent preprints:\n\n📝 **FlowerTune** (2025): A cross-domain benchmark for federated fine-tuning of large language models. This collaborative work provides comprehensive evaluation frameworks for federated learning systems.\n\n📝 **Fed-pilot** (2024): Optimizing LoRA allocation for efficient federated fine-tuning with heterogeneous clients. This work addresses the challenge of resource allocation in federated learning environments.\n\nBoth preprints are available and showcase innovative approaches to federated learning challenges.",
    },
    // Personal
    RuleDef {
        triggers: &["who", "about", "background"],
        response: "Zikai Zhang is a PhD student in Computer Science at the University of Nevada, Reno. Here's what you should know:\n\n• **Current Role**: PhD Student (2023-present)\n• **Research Focus**: Federated Learning, AI Safety, Computer Vision\n• **Education**: PhD at UNR, M.Eng at Huaqiao University, B.Eng at East China Jiaotong University\n• **Location**: Reno, NV, USA\n• **Pronouns**: He/Him/His\n\nHe's passionate about making AI systems more efficient, secure, and practical for real-world applications.",
    },
    RuleDef {
        triggers: &["contact", "email", "reach"],
        response: "You can reach Zikai through:\n\n📧 **Email**: zikaiz[at]unr[dot]edu\n🏢 **Office**: William N. Pennington Engineering Building (WPEB) 402\n📍 **Address**: 1664 N. Virginia Street, Reno, NV 89557\n\n🔗 **Online Profiles**:\n• Google Scholar: /citations?user=Ban1y64AAAAJ\n• LinkedIn: /in/zikai-z-9852921a1\n• GitHub: /superkevingit",
    },
    RuleDef {
        triggers: &["education", "degree", "university"],
        response: "Zikai's educational background:\n\n🎓 **PhD in Computer Science** (2023-present)\n   University of Nevada, Reno\n\n🎓 **M.Eng in Computer Science** (2018-2021)\n   Huaqiao University\n\n🎓 **B.Eng in Mechanical Engineering** (2014-2018)\n   East China Jiaotong University\n\nHis academic journey spans multiple disciplines, from mechanical engineering to computer science, with a focus on AI and machine learning.",
    },
    RuleDef {
        triggers: &["help", "what can you", "assist"],
        response: "I can help you learn about:\n\n🔬 **Research Areas**: Federated Learning, AI Safety, Computer Vision\n📚 **Publications**: Recent papers and research contributions\n👨‍🎓 **Background**: Education, experience, and career path\n📞 **Contact**: How to reach Zikai\n🏫 **Institution**: University of Nevada, Reno details\n\nJust ask me anything about Zikai's work or background! You can also click the tabs above to explore different sections of his homepage.",
    },
];
