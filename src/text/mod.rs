// Text preparation: turns raw post content into the plain lowercase word
// stream the sentiment scorer expects.

pub mod normalize;
