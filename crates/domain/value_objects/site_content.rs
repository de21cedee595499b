use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct FaqEntry {
    pub question: &'static str,
    pub answer: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ContactChannel {
    pub label: &'static str,
    pub value: &'static str,
    pub href: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct HeadlineStat {
    pub label: &'static str,
    pub value: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct SectionAnchor {
    pub id: &'static str,
    pub title: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Highlight {
    pub title: &'static str,
    pub description: &'static str,
}

/// Numbered onboarding step, `step` is the label shown ("01".."04").
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct OnboardingStep {
    pub step: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct HowItWorks {
    pub highlights: &'static [Highlight],
    pub steps: &'static [OnboardingStep],
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Testimonial {
    pub name: &'static str,
    pub role: &'static str,
    pub location: &'static str,
    pub content: &'static str,
    pub profit: &'static str,
    pub rating: u8,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct SiteContent {
    pub brand: &'static str,
    pub sections: &'static [SectionAnchor],
    pub stats: &'static [HeadlineStat],
    pub how_it_works: HowItWorks,
    pub testimonials: &'static [Testimonial],
    pub faq: &'static [FaqEntry],
    pub contact: &'static [ContactChannel],
}

pub static SITE_CONTENT: SiteContent = SiteContent {
    brand: "David Anderson Trade",
    sections: &[
        SectionAnchor { id: "hero", title: "Home" },
        SectionAnchor { id: "how-it-works", title: "How It Works" },
        SectionAnchor { id: "pricing", title: "Pricing" },
        SectionAnchor { id: "features", title: "Features" },
        SectionAnchor { id: "faq", title: "FAQ" },
        SectionAnchor { id: "contact", title: "Contact" },
    ],
    stats: &[
        HeadlineStat { label: "Trades Won", value: "4,847" },
        HeadlineStat { label: "Active Traders", value: "5,234" },
        HeadlineStat { label: "Profit Generated", value: "$90,432,547" },
        HeadlineStat { label: "Win Rate", value: "98%" },
    ],
    how_it_works: HowItWorks {
        highlights: &[
            Highlight {
                title: "1-2 Solid Trades Daily",
                description: "Receive carefully analyzed trading signals every day. Quality over quantity ensures maximum profitability.",
            },
            Highlight {
                title: "98% Win Rate",
                description: "Our proven track record speaks for itself. Join thousands of traders who consistently profit with our signals.",
            },
            Highlight {
                title: "1-Hour Advance Notice",
                description: "Get notified one hour before each trade entry, giving you ample time to prepare and execute.",
            },
            Highlight {
                title: "Your Local Timezone",
                description: "Trade entry times are automatically adjusted to your local timezone for seamless execution.",
            },
        ],
        steps: &[
            OnboardingStep {
                step: "01",
                title: "Subscribe",
                description: "Choose your plan and complete registration",
            },
            OnboardingStep {
                step: "02",
                title: "Receive Signals",
                description: "Get daily trade alerts via email",
            },
            OnboardingStep {
                step: "03",
                title: "Execute Trades",
                description: "Follow the precise entry instructions",
            },
            OnboardingStep {
                step: "04",
                title: "Profit",
                description: "Watch your portfolio grow consistently",
            },
        ],
    },
    testimonials: &[
        Testimonial {
            name: "Michael Chen",
            role: "stock Trader",
            location: "Singapore",
            content: "I've been using David Anderson Trade signals for 6 months now and my portfolio has grown by 340%. The accuracy is incredible - almost every signal hits the target.",
            profit: "+$245,200",
            rating: 5,
        },
        Testimonial {
            name: "Sarah Williams",
            role: "Crypto Investor",
            location: "United Kingdom",
            content: "As a beginner, I was skeptical about trading signals. But the 1-hour advance notice gives me enough time to prepare, and the clear entry/exit points make execution easy.",
            profit: "+$328,500",
            rating: 5,
        },
        Testimonial {
            name: "James Rodriguez",
            role: "Day Trader",
            location: "United States",
            content: "The Premium plan is worth every penny. The 1-on-1 strategy sessions helped me understand the market better, and the VIP support is always responsive.",
            profit: "+$567,800",
            rating: 5,
        },
        Testimonial {
            name: "Emma Thompson",
            role: "Part-time Trader",
            location: "Australia",
            content: "I work full-time but still manage to follow the signals. The timezone adjustment feature ensures I get alerts at convenient times. Best investment I've made!",
            profit: "+$119,300",
            rating: 5,
        },
    ],
    faq: &[
        FaqEntry {
            question: "How do I receive the trading signals?",
            answer: "Trading signals are delivered directly to your registered email address. Premium plan subscribers also receive signals via SMS and Telegram for instant notifications. You'll get all the details including entry price, stop-loss, and take-profit levels.",
        },
        FaqEntry {
            question: "What is the win rate of your signals?",
            answer: "Our signals have a proven 98% win rate based on our historical performance. We achieve this through rigorous technical analysis, market research, and risk management strategies. Every signal is carefully vetted before being sent to our subscribers.",
        },
        FaqEntry {
            question: "How many signals do I receive per day?",
            answer: "You'll receive 1-2 high-quality trading signals daily. We prioritize quality over quantity, ensuring each signal has a high probability of success. This approach helps you focus on the best opportunities without being overwhelmed.",
        },
        FaqEntry {
            question: "What markets do you cover?",
            answer: "Our signals cover major forex pairs (EUR/USD.), cryptocurrencies (BTC, ETH.), stock indices, and commodities. This diversification helps spread risk across different markets.",
        },
        FaqEntry {
            question: "How much capital do I need to start?",
            answer: "You can start with any amount you're comfortable with. We recommend starting with at least $500-$1000 to properly manage risk and see meaningful returns. Our signals include position sizing recommendations based on your account size.",
        },
        FaqEntry {
            question: "Do I need trading experience?",
            answer: "No prior experience is required! Our signals come with clear instructions including exact entry points, stop-loss levels, and take-profit targets. We also provide educational resources and support to help beginners understand the basics.",
        },
        FaqEntry {
            question: "What is a purchase code and how do I get one?",
            answer: "A purchase code is a unique verification code that activates your subscription. After making your payment through your signal account manager, you'll receive your purchase code. Simply enter it during registration to activate your plan.",
        },
        FaqEntry {
            question: "Can I cancel my subscription?",
            answer: "Our plans are prepaid for the duration selected (3, 6, or 12 months). While we don't offer refunds, you can contact our support team if you have any concerns. We're committed to your success and will work with you to resolve any issues.",
        },
        FaqEntry {
            question: "What timezone are the signals based on?",
            answer: "Our signals are automatically adjusted to your local timezone. When you register, we detect your timezone and send trade entry times accordingly. This ensures you receive alerts at convenient times regardless of where you are in the world.",
        },
        FaqEntry {
            question: "How do I contact support?",
            answer: "You can reach our support team 24/7 via email at davidandersontrade@email.com, through our contact form, or via live chat on our website. Premium subscribers also get access to priority support with faster response times.",
        },
    ],
    contact: &[
        ContactChannel {
            label: "Email",
            value: "davidandersontrade@email.com",
            href: Some("mailto:davidandersontrade@email.com"),
        },
        ContactChannel {
            label: "Support Hours",
            value: "24/7 Available",
            href: None,
        },
        ContactChannel {
            label: "Telegram",
            value: "@DavidAndersonTrade",
            href: Some("https://t.me/DavidAndersonTrade"),
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_cover_navigation_targets() {
        let ids: Vec<_> = SITE_CONTENT.sections.iter().map(|s| s.id).collect();
        for expected in ["hero", "pricing", "faq", "contact"] {
            assert!(ids.contains(&expected), "missing anchor {expected}");
        }
    }

    #[test]
    fn faq_mentions_purchase_codes() {
        assert!(
            SITE_CONTENT
                .faq
                .iter()
                .any(|entry| entry.question.contains("purchase code"))
        );
    }

    #[test]
    fn testimonials_and_steps_are_served() {
        assert_eq!(SITE_CONTENT.testimonials.len(), 4);
        assert!(
            SITE_CONTENT
                .testimonials
                .iter()
                .all(|t| (1..=5).contains(&t.rating) && t.profit.starts_with("+$"))
        );

        let steps: Vec<_> = SITE_CONTENT.how_it_works.steps.iter().map(|s| s.step).collect();
        assert_eq!(steps, ["01", "02", "03", "04"]);
        assert_eq!(SITE_CONTENT.how_it_works.highlights.len(), 4);
    }
}
