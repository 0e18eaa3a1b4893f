mod test_network;
